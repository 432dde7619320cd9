//! Timing Diagram Driver.
//!
//! Each instruction is issued one column after its predecessor. Stalls push
//! the *next* instruction further right: when a row contains stalls, the
//! following row is shifted by one column per stall. A row without stalls
//! keeps the shift it inherited, so the shift only changes when new stalls
//! appear.
//!
//! The shift is threaded through the walk as an explicit [`TimingCarry`]
//! value, making the diagram a fold over the program.

use log::trace;
use serde::Serialize;

use crate::core::pipeline::{self, stalls::Forwarding};
use crate::core::{NearbyHazards, PipelineSequence};
use crate::isa::Instruction;

/// State handed from one row to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TimingCarry {
    /// Stall stages in the previous row.
    pub stalls: usize,
    /// Adjustment the previous row was drawn with.
    pub adjustment: usize,
}

impl TimingCarry {
    /// Adjustment for the row following the one this carry came from.
    pub fn next_adjustment(self, base_width: usize) -> usize {
        if self.stalls > 0 {
            base_width * self.stalls
        } else {
            self.adjustment
        }
    }
}

/// One row of the timing diagram.
#[derive(Clone, Debug)]
pub struct TimingRow<'a> {
    /// 0-based program position.
    pub index: usize,
    pub instruction: &'a Instruction,
    pub sequence: PipelineSequence,
    /// Findings considered when choosing the stall count.
    pub hazards: NearbyHazards<'a>,
    /// Extra horizontal shift inherited from earlier stalls.
    pub adjustment: usize,
    /// Horizontal position of the row: `index * base_width + adjustment`.
    pub offset: usize,
}

impl TimingRow<'_> {
    pub fn carry(&self) -> TimingCarry {
        TimingCarry {
            stalls: self.sequence.stall_count(),
            adjustment: self.adjustment,
        }
    }

    /// Clock cycle (0-based) in which the row's Fetch happens.
    pub fn start_cycle(&self, base_width: usize) -> usize {
        if base_width == 0 {
            return self.index;
        }
        self.offset / base_width
    }

    /// Clock cycle after the row's Write Back completes.
    pub fn end_cycle(&self, base_width: usize) -> usize {
        self.start_cycle(base_width) + self.sequence.len()
    }
}

/// Builds the row for `program[index]` given the carry from the previous
/// row (`None` for the first instruction).
///
/// # Panics
///
/// Panics if `index` is out of bounds for `program`.
pub fn timing_step<'a>(
    program: &'a [Instruction],
    index: usize,
    forwarding: Forwarding,
    base_width: usize,
    carry: Option<TimingCarry>,
) -> TimingRow<'a> {
    let (sequence, hazards) = pipeline::schedule(program, index, forwarding);
    let adjustment = carry.map_or(0, |c| c.next_adjustment(base_width));
    let offset = index * base_width + adjustment;

    trace!(
        "[Timing] #{} [{}] {} offset={} adjustment={}",
        index + 1,
        program[index].raw(),
        sequence.codes(),
        offset,
        adjustment
    );

    TimingRow {
        index,
        instruction: &program[index],
        sequence,
        hazards,
        adjustment,
        offset,
    }
}

/// Builds every row of the timing diagram in program order.
pub fn timing_rows(
    program: &[Instruction],
    forwarding: Forwarding,
    base_width: usize,
) -> Vec<TimingRow<'_>> {
    (0..program.len())
        .scan(None, |carry, index| {
            let row = timing_step(program, index, forwarding, base_width, *carry);
            *carry = Some(row.carry());
            Some(row)
        })
        .collect()
}
