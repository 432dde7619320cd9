//! Data Hazard Detection.
//!
//! This module classifies the data hazard, if any, between an instruction and
//! one of its two immediate predecessors. Detection is a pure table lookup:
//! each opcode-class pair owns an ordered list of operand comparisons, and the
//! first comparison that names the same register on both sides decides the
//! hazard kind. Instructions further back than two positions are never
//! examined.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::common::Register;
use crate::isa::{Instruction, OpClass};

/// How far back the detector looks.
pub const LOOKBACK: usize = 2;

/// Kind of data hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HazardKind {
    /// Read-After-Write.
    Raw,
    /// Write-After-Read.
    War,
    /// Write-After-Write.
    Waw,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [HazardKind::Raw, HazardKind::War, HazardKind::Waw];

    pub fn label(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::War => "WAR",
            Self::Waw => "WAW",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operand slot of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Rd,
    Rs,
    Rt,
}

impl Operand {
    fn of(self, inst: &Instruction) -> Option<&Register> {
        match self {
            Self::Rd => inst.rd(),
            Self::Rs => inst.rs(),
            Self::Rt => inst.rt(),
        }
    }
}

/// One comparison: `current.<current>` against `previous.<previous>`.
#[derive(Clone, Copy, Debug)]
pub struct Check {
    pub kind: HazardKind,
    pub current: Operand,
    pub previous: Operand,
}

/// Ordered checks for one (current, previous) opcode-class pair.
#[derive(Clone, Copy, Debug)]
pub struct DetectRule {
    pub current: OpClass,
    pub previous: OpClass,
    pub checks: &'static [Check],
}

const fn check(kind: HazardKind, current: Operand, previous: Operand) -> Check {
    Check { kind, current, previous }
}

use HazardKind::{Raw, War, Waw};
use OpClass::{Alu, Load, Store};
use Operand::{Rd, Rs, Rt};

/// Detection table. Pairs absent from the table (`SW` after `SW`, `ADD`/`SUB`
/// after `SW`) are never hazards.
pub const DETECT_RULES: &[DetectRule] = &[
    DetectRule {
        current: Alu,
        previous: Alu,
        checks: &[
            check(War, Rd, Rs),
            check(War, Rd, Rt),
            check(Raw, Rs, Rd),
            check(Raw, Rt, Rd),
            check(Waw, Rd, Rd),
        ],
    },
    DetectRule {
        current: Store,
        previous: Load,
        checks: &[check(Raw, Rs, Rt)],
    },
    DetectRule {
        current: Load,
        previous: Store,
        checks: &[check(War, Rt, Rt), check(Raw, Rt, Rs)],
    },
    DetectRule {
        current: Load,
        previous: Load,
        checks: &[check(Waw, Rt, Rt)],
    },
    DetectRule {
        current: Load,
        previous: Alu,
        checks: &[check(Waw, Rt, Rd), check(War, Rt, Rs), check(War, Rt, Rt)],
    },
    DetectRule {
        current: Store,
        previous: Alu,
        checks: &[check(Raw, Rs, Rd)],
    },
    DetectRule {
        current: Alu,
        previous: Load,
        checks: &[check(Raw, Rs, Rt), check(Raw, Rt, Rt), check(Waw, Rd, Rt)],
    },
];

/// A detected hazard between two instructions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HazardFinding<'a> {
    pub kind: HazardKind,
    /// Register of the current instruction involved in the conflict.
    pub register: &'a Register,
    /// Register of the predecessor involved in the conflict.
    pub previous_register: &'a Register,
    #[serde(skip)]
    pub current: &'a Instruction,
    #[serde(skip)]
    pub previous: &'a Instruction,
    /// Instructions between the predecessor and the current one (1 or 2).
    pub distance: usize,
    /// 1-based program position of the predecessor.
    pub previous_position: usize,
}

impl fmt::Display for HazardFinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} HAZARD] Instruction [{}] Register {} depends on Instruction#{} [{}] Register {}",
            self.kind,
            self.current.raw(),
            self.register,
            self.previous_position,
            self.previous.raw(),
            self.previous_register
        )
    }
}

/// Classifies the hazard between `current` and a predecessor `distance`
/// instructions earlier, located at 1-based `previous_position`.
///
/// Returns `None` when the pair shares no conflicting register or the opcode
/// pair is not modeled.
pub fn detect<'a>(
    current: &'a Instruction,
    previous: &'a Instruction,
    distance: usize,
    previous_position: usize,
) -> Option<HazardFinding<'a>> {
    let rule = DETECT_RULES
        .iter()
        .find(|r| r.current == current.class() && r.previous == previous.class())?;

    rule.checks.iter().find_map(|c| {
        let register = c.current.of(current);
        let previous_register = c.previous.of(previous);
        if !Register::same(register, previous_register) {
            return None;
        }
        Some(HazardFinding {
            kind: c.kind,
            register: register?,
            previous_register: previous_register?,
            current,
            previous,
            distance,
            previous_position,
        })
    })
}

/// Findings of one instruction against both of its predecessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NearbyHazards<'a> {
    /// Finding against the instruction immediately before.
    pub adjacent: Option<HazardFinding<'a>>,
    /// Finding against the instruction two positions before.
    pub distant: Option<HazardFinding<'a>>,
}

impl<'a> NearbyHazards<'a> {
    /// Non-empty findings, distance 1 first.
    pub fn iter(&self) -> impl Iterator<Item = &HazardFinding<'a>> {
        self.adjacent.iter().chain(self.distant.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.adjacent.is_none() && self.distant.is_none()
    }
}

/// Runs the detector for `program[index]` against its predecessors at
/// distance 1 and 2, where they exist.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `program`.
pub fn detect_nearby(program: &[Instruction], index: usize) -> NearbyHazards<'_> {
    let current = &program[index];
    let at = |distance: usize| {
        let prev_idx = index.checked_sub(distance)?;
        detect(current, &program[prev_idx], distance, prev_idx + 1)
    };

    let nearby = NearbyHazards {
        adjacent: at(1),
        distant: at(LOOKBACK),
    };
    for finding in nearby.iter() {
        debug!("[Hazard] distance {}: {}", finding.distance, finding);
    }
    nearby
}
