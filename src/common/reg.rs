//! Register Identifiers.
//!
//! No register file is modeled: registers only exist as names, and the only
//! thing the hazard detector ever asks of two registers is whether they are
//! the same one.

use std::fmt;

use serde::Serialize;

/// A register name such as `R1`, normalized to uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Register(String);

impl Register {
    /// Creates a register from its textual name.
    ///
    /// Surrounding whitespace and trailing commas are stripped and the name
    /// is uppercased, so `r1,` and `R1` name the same register.
    pub fn new(name: &str) -> Self {
        Self(name.trim().trim_end_matches(',').trim().to_uppercase())
    }

    /// Returns the register name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Compares two optional operands.
    ///
    /// Unset operands never match anything, including another unset operand.
    pub fn same(a: Option<&Register>, b: Option<&Register>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
