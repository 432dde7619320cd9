//! Common types used throughout the pipeline simulator.
//!
//! This module provides the register identifier shared by the instruction
//! model and the hazard detector, and the error type reported by the parser
//! and the command-line front end.

/// Error types for parsing and configuration.
pub mod error;

/// Register identifiers.
pub mod reg;

pub use error::{SimError, SimResult};
pub use reg::Register;
