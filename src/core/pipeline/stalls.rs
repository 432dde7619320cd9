//! Stall Policy.
//!
//! Translates a detected hazard into a number of stall cycles inserted right
//! after Fetch. The rules form a single lookup table keyed on forwarding
//! mode, hazard kind, the two opcode classes, and whether the rule also
//! applies to a predecessor two instructions back.
//!
//! Only one predecessor ever drives stalls for a given instruction. A finding
//! against the distance-2 predecessor takes precedence over the distance-1
//! finding, even when the distance-2 rule inserts nothing.

use log::debug;
use serde::Serialize;

use crate::core::pipeline::hazards::{HazardFinding, HazardKind, NearbyHazards};
use crate::isa::OpClass;

/// Presence of a forwarding (bypass) unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Forwarding {
    On,
    Off,
}

impl Forwarding {
    pub fn label(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// Predecessor distances a rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Distance 1 and distance 2.
    Any,
    /// Distance 1 only.
    Adjacent,
}

impl Reach {
    fn covers(self, distance: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Adjacent => distance == 1,
        }
    }
}

/// One row of the stall table.
#[derive(Clone, Copy, Debug)]
pub struct StallRule {
    pub forwarding: Forwarding,
    pub hazard: HazardKind,
    pub current: OpClass,
    pub previous: OpClass,
    pub reach: Reach,
    pub stalls: usize,
}

const fn rule(
    forwarding: Forwarding,
    hazard: HazardKind,
    current: OpClass,
    previous: OpClass,
    reach: Reach,
    stalls: usize,
) -> StallRule {
    StallRule {
        forwarding,
        hazard,
        current,
        previous,
        reach,
        stalls,
    }
}

use Forwarding::{Off, On};
use HazardKind::{Raw, War, Waw};
use OpClass::{Alu, Load, Store};
use Reach::{Adjacent, Any};

/// Stall table. Combinations without a row insert no stalls.
#[rustfmt::skip]
pub const STALL_RULES: &[StallRule] = &[
    // No forwarding unit
    rule(Off, War, Load,  Store, Any,      1),
    rule(Off, War, Alu,   Alu,   Any,      2),
    rule(Off, War, Load,  Alu,   Any,      2),
    rule(Off, Raw, Alu,   Alu,   Any,      2),
    rule(Off, Raw, Load,  Store, Adjacent, 1),
    rule(Off, Raw, Store, Load,  Adjacent, 1),
    rule(Off, Raw, Store, Alu,   Any,      2),
    rule(Off, Raw, Alu,   Load,  Any,      1),
    rule(Off, Waw, Alu,   Alu,   Any,      2),
    rule(Off, Waw, Load,  Load,  Any,      1),
    rule(Off, Waw, Load,  Alu,   Any,      2),
    rule(Off, Waw, Alu,   Load,  Any,      2),
    // Forwarding unit present
    rule(On,  War, Load,  Store, Adjacent, 1),
    rule(On,  Raw, Alu,   Load,  Adjacent, 1),
    rule(On,  Waw, Load,  Load,  Adjacent, 1),
];

/// Looks up the number of stalls for a hazard of `hazard` between an
/// instruction of class `current` and a predecessor of class `previous`
/// located `distance` instructions earlier.
pub fn stall_count(
    current: OpClass,
    previous: OpClass,
    hazard: HazardKind,
    forwarding: Forwarding,
    distance: usize,
) -> usize {
    STALL_RULES
        .iter()
        .find(|r| {
            r.forwarding == forwarding
                && r.hazard == hazard
                && r.current == current
                && r.previous == previous
                && r.reach.covers(distance)
        })
        .map_or(0, |r| r.stalls)
}

/// Stalls required by a single finding.
pub fn stalls_for(finding: &HazardFinding<'_>, forwarding: Forwarding) -> usize {
    stall_count(
        finding.current.class(),
        finding.previous.class(),
        finding.kind,
        forwarding,
        finding.distance,
    )
}

/// Picks the finding that drives stall insertion: the distance-2 finding
/// when present, otherwise the distance-1 finding.
pub fn governing<'h, 'a>(nearby: &'h NearbyHazards<'a>) -> Option<&'h HazardFinding<'a>> {
    nearby.distant.as_ref().or(nearby.adjacent.as_ref())
}

/// Stalls to insert for an instruction given its findings.
pub fn select_stalls(nearby: &NearbyHazards<'_>, forwarding: Forwarding) -> usize {
    let Some(finding) = governing(nearby) else {
        return 0;
    };
    let stalls = stalls_for(finding, forwarding);
    debug!(
        "[Stall] [{}] {} hazard at distance {} with forwarding {}: {} stall(s)",
        finding.current.raw(),
        finding.kind,
        finding.distance,
        forwarding.label(),
        stalls
    );
    stalls
}
