//! Program Loader.
//!
//! Programs come either from the `--commands` string or from a text file.
//! In a file, newlines separate instructions just like `|` does, blank lines
//! are skipped, and anything after a `#` is a comment.

use std::fs;
use std::path::Path;

use log::info;

use crate::common::{SimError, SimResult};
use crate::isa::{self, Instruction};

/// Parses an inline command string.
pub fn load_commands(commands: &str) -> SimResult<Vec<Instruction>> {
    let program = isa::parse_commands(commands)?;
    info!("[Loader] Parsed {} instruction(s) from command string", program.len());
    Ok(program)
}

/// Reads and parses a program file.
pub fn load_file(path: &Path) -> SimResult<Vec<Instruction>> {
    let text = fs::read_to_string(path).map_err(|e| SimError::ProgramRead(path.to_path_buf(), e))?;
    let program = isa::parse_commands(&file_to_commands(&text))?;
    info!(
        "[Loader] Parsed {} instruction(s) from {}",
        program.len(),
        path.display()
    );
    Ok(program)
}

/// Joins the non-empty, comment-stripped lines of a program file with `|`.
pub fn file_to_commands(text: &str) -> String {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(&isa::parse::COMMAND_SEPARATOR.to_string())
}
