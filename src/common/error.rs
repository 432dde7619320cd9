//! Error types for the simulator.
//!
//! Every failure the simulator can report happens before the hazard engine
//! runs: reading configuration, starting the logger, or parsing the command
//! string. The engine itself is total over well-formed instructions.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Opcode {opcode} not supported in instruction #{position} [{raw}]! Please resubmit")]
    UnsupportedOpcode {
        opcode: String,
        position: usize,
        raw: String,
    },

    #[error("Instruction #{position} [{raw}] is missing its {operand} operand")]
    MissingOperand {
        position: usize,
        raw: String,
        operand: &'static str,
    },

    #[error("Instruction #{position} [{raw}] has a malformed memory operand '{operand}', expected offset(register)")]
    MalformedMemoryOperand {
        position: usize,
        raw: String,
        operand: String,
    },

    #[error("Instruction #{0} is empty")]
    EmptyInstruction(usize),

    #[error("No instructions supplied")]
    NoInstructions,

    #[error("Failed to read program file '{0}': {1}")]
    ProgramRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to read config file '{0}': {1}")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to start logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with SimError
pub type SimResult<T> = Result<T, SimError>;
