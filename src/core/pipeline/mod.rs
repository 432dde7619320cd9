//! Instruction pipeline model.
//!
//! This module contains the hazard detector, the stall policy that turns
//! hazards into stall cycles, and the stage builder producing each
//! instruction's stage sequence.

/// Data hazard detection between nearby instructions.
pub mod hazards;

/// Stall insertion rules, with and without a forwarding unit.
pub mod stalls;

/// Pipeline stages and per-instruction stage sequences.
pub mod stage;

use crate::isa::Instruction;

use hazards::NearbyHazards;
use stage::PipelineSequence;
use stalls::Forwarding;

/// Builds the stage sequence of `program[index]`, including the stalls its
/// hazards require.
///
/// Returns the sequence together with the findings that were considered.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `program`.
pub fn schedule(
    program: &[Instruction],
    index: usize,
    forwarding: Forwarding,
) -> (PipelineSequence, NearbyHazards<'_>) {
    let nearby = hazards::detect_nearby(program, index);
    let stalls = stalls::select_stalls(&nearby, forwarding);
    (stage::build_with_stalls(&program[index], stalls), nearby)
}
