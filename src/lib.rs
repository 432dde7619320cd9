//! MIPS Pipeline Hazard Simulator Library.
//!
//! This crate models a classic 5-stage pipeline (Fetch, Decode, Execute,
//! Memory, Write Back) running `ADD`, `SUB`, `LW` and `SW`. It detects
//! RAW, WAR and WAW data hazards between each instruction and its two
//! predecessors, inserts stall cycles with or without a forwarding unit, and
//! renders a hazard report and a timing diagram.
//!
//! # Modules
//!
//! * `common`: Register identifiers and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Hazard detection, stall policy and stage sequences.
//! * `isa`: Instruction model and command parser.
//! * `render`: Text and JSON output.
//! * `sim`: Program loading and the report/timing drivers.
//! * `stats`: Run statistics.

/// Shared register identifiers and error types.
pub mod common;

/// Configuration for logging and diagram rendering.
///
/// Loads an optional TOML file; every key has a default.
pub mod config;

/// Hazard and timing engine.
///
/// Pure functions from a program to hazard findings and per-instruction
/// stage sequences.
pub mod core;

/// Instruction model and parser for `ADD`, `SUB`, `LW` and `SW`.
pub mod isa;

/// Text and JSON rendering of reports and timing diagrams.
pub mod render;

/// Program loading plus the hazard report and timing diagram drivers.
pub mod sim;

/// Run statistics.
pub mod stats;
