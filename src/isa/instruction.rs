//! Decoded Instructions.
//!
//! An [`Instruction`] is an immutable record of an opcode and the operands
//! that opcode uses. Operand roles follow the MIPS encoding:
//!
//! | Opcode    | `rd`        | `rs`            | `rt`            |
//! |-----------|-------------|-----------------|-----------------|
//! | `ADD/SUB` | destination | first source    | second source   |
//! | `LW`      | unset       | base address    | destination     |
//! | `SW`      | unset       | stored register | base address    |

use std::fmt;

use serde::Serialize;

use crate::common::Register;

/// Supported opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// Register-register addition.
    Add,
    /// Register-register subtraction.
    Sub,
    /// Load word.
    Lw,
    /// Store word.
    Sw,
}

impl Opcode {
    /// Looks up an opcode by mnemonic, ignoring case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        match text.to_uppercase().as_str() {
            "ADD" => Some(Self::Add),
            "SUB" => Some(Self::Sub),
            "LW" => Some(Self::Lw),
            "SW" => Some(Self::Sw),
            _ => None,
        }
    }

    /// Returns the uppercase assembler mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Lw => "LW",
            Self::Sw => "SW",
        }
    }

    /// Returns the hazard class of the opcode.
    ///
    /// `ADD` and `SUB` behave identically for hazard purposes.
    pub fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Sub => OpClass::Alu,
            Self::Lw => OpClass::Load,
            Self::Sw => OpClass::Store,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Opcode grouping used by the hazard and stall rule tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OpClass {
    /// `ADD` or `SUB`.
    Alu,
    /// `LW`.
    Load,
    /// `SW`.
    Store,
}

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    opcode: Opcode,
    #[serde(skip_serializing_if = "Option::is_none")]
    rd: Option<Register>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rs: Option<Register>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rt: Option<Register>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<String>,
    raw: String,
}

impl Instruction {
    /// Builds an `ADD` instruction: `ADD rd, rs, rt`.
    pub fn add(rd: &str, rs: &str, rt: &str, raw: &str) -> Self {
        Self::alu(Opcode::Add, rd, rs, rt, raw)
    }

    /// Builds a `SUB` instruction: `SUB rd, rs, rt`.
    pub fn sub(rd: &str, rs: &str, rt: &str, raw: &str) -> Self {
        Self::alu(Opcode::Sub, rd, rs, rt, raw)
    }

    fn alu(opcode: Opcode, rd: &str, rs: &str, rt: &str, raw: &str) -> Self {
        Self {
            opcode,
            rd: Some(Register::new(rd)),
            rs: Some(Register::new(rs)),
            rt: Some(Register::new(rt)),
            offset: None,
            raw: raw.trim().to_string(),
        }
    }

    /// Builds a load: `LW rt, offset(rs)`.
    pub fn load(rt: &str, offset: &str, rs: &str, raw: &str) -> Self {
        Self {
            opcode: Opcode::Lw,
            rd: None,
            rs: Some(Register::new(rs)),
            rt: Some(Register::new(rt)),
            offset: Some(offset.trim().to_string()),
            raw: raw.trim().to_string(),
        }
    }

    /// Builds a store: `SW rs, offset(rt)`.
    pub fn store(rs: &str, offset: &str, rt: &str, raw: &str) -> Self {
        Self {
            opcode: Opcode::Sw,
            rd: None,
            rs: Some(Register::new(rs)),
            rt: Some(Register::new(rt)),
            offset: Some(offset.trim().to_string()),
            raw: raw.trim().to_string(),
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn class(&self) -> OpClass {
        self.opcode.class()
    }

    /// Destination register (`ADD`/`SUB` only).
    pub fn rd(&self) -> Option<&Register> {
        self.rd.as_ref()
    }

    pub fn rs(&self) -> Option<&Register> {
        self.rs.as_ref()
    }

    pub fn rt(&self) -> Option<&Register> {
        self.rt.as_ref()
    }

    /// Memory displacement text (`LW`/`SW` only). May be empty, as in `(R2)`.
    pub fn offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    /// Source text the instruction was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
