//! Test module organization.
//!
//! This module organizes all integration tests for the pipeline simulator.

/// Instruction model and command parser tests.
mod isa_tests;


/// Stall table and precedence tests.
mod stall_tests;

/// Stage sequence construction tests.
mod stage_tests;
