//! Instruction set definitions.
//!
//! The simulated machine understands four MIPS instructions: the
//! register-register `ADD` and `SUB`, and the memory instructions `LW` and
//! `SW`. This module holds the decoded instruction model and the parser that
//! produces it from the pipe-separated command text.

/// Decoded instruction model.
pub mod instruction;

/// Command-string tokenizer and instruction parser.
pub mod parse;

pub use instruction::{Instruction, OpClass, Opcode};
pub use parse::parse_commands;
