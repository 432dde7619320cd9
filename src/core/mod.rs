//! Hazard and timing engine.
//!
//! Everything under this module is pure: it reads a program and produces
//! findings and stage sequences without I/O.

/// Hazard detection, stall policy and stage sequences.
pub mod pipeline;

pub use pipeline::hazards::{detect, HazardFinding, HazardKind, NearbyHazards};
pub use pipeline::stage::{PipelineSequence, PipelineStage, StageKind};
pub use pipeline::stalls::Forwarding;
