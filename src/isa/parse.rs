//! Command-String Parser.
//!
//! Instructions arrive as a single `|`-separated string such as
//! `ADD R1, R2, R3 | LW R4, 0(R1)`. Each segment is split on whitespace and
//! commas; register names are uppercased. Memory operands have the form
//! `offset(register)` where the offset text may be empty.

use log::{debug, warn};

use crate::common::{SimError, SimResult};
use crate::isa::instruction::{Instruction, Opcode};

/// Separator between instructions in a command string.
pub const COMMAND_SEPARATOR: char = '|';

/// Parses a pipe-separated command string into instructions in program order.
///
/// # Errors
///
/// Fails on the first segment that is empty, names an unsupported opcode,
/// lacks an operand, or carries a memory operand not shaped like
/// `offset(register)`.
pub fn parse_commands(commands: &str) -> SimResult<Vec<Instruction>> {
    if commands.trim().is_empty() {
        return Err(SimError::NoInstructions);
    }

    commands
        .split(COMMAND_SEPARATOR)
        .enumerate()
        .map(|(idx, segment)| parse_instruction(segment, idx + 1))
        .collect()
}

/// Parses one instruction. `position` is 1-based and only used in errors.
pub fn parse_instruction(segment: &str, position: usize) -> SimResult<Instruction> {
    let raw = segment.trim();
    let mut tokens = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    let mnemonic = tokens.next().ok_or(SimError::EmptyInstruction(position))?;
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| SimError::UnsupportedOpcode {
        opcode: mnemonic.to_uppercase(),
        position,
        raw: raw.to_string(),
    })?;

    let mut operand = |name: &'static str| {
        tokens.next().ok_or_else(|| SimError::MissingOperand {
            position,
            raw: raw.to_string(),
            operand: name,
        })
    };

    let inst = match opcode {
        Opcode::Add | Opcode::Sub => {
            let rd = operand("destination register")?;
            let rs = operand("first source register")?;
            let rt = operand("second source register")?;
            if opcode == Opcode::Add {
                Instruction::add(rd, rs, rt, raw)
            } else {
                Instruction::sub(rd, rs, rt, raw)
            }
        }
        Opcode::Lw => {
            let rt = operand("destination register")?;
            let mem = operand("memory")?;
            let (offset, base) = split_memory_operand(mem, position, raw)?;
            Instruction::load(rt, offset, base, raw)
        }
        Opcode::Sw => {
            let rs = operand("source register")?;
            let mem = operand("memory")?;
            let (offset, base) = split_memory_operand(mem, position, raw)?;
            Instruction::store(rs, offset, base, raw)
        }
    };

    let extra: Vec<&str> = tokens.collect();
    if !extra.is_empty() {
        warn!("Ignoring extra operands {:?} in instruction #{} [{}]", extra, position, raw);
    }

    debug!("Parsed instruction #{}: {:?}", position, inst);
    Ok(inst)
}

/// Splits `offset(register)` into its offset text and base register.
fn split_memory_operand<'a>(
    operand: &'a str,
    position: usize,
    raw: &str,
) -> SimResult<(&'a str, &'a str)> {
    let malformed = || SimError::MalformedMemoryOperand {
        position,
        raw: raw.to_string(),
        operand: operand.to_string(),
    };

    let open = operand.find('(').ok_or_else(malformed)?;
    let inner = operand[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    if inner.is_empty() || inner.contains('(') {
        return Err(malformed());
    }
    Ok((&operand[..open], inner))
}
