//! Hazard Report Driver.
//!
//! Produces one entry per instruction listing its hazards against the two
//! preceding instructions. The report is purely descriptive: every finding
//! is listed here, including findings that the stall policy ignores.

use crate::core::pipeline::hazards::{self, NearbyHazards};
use crate::isa::Instruction;

/// Marker placed between an instruction and each of its findings.
pub const REPORT_SEPARATOR: &str = "------";

/// Report entry for one instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry<'a> {
    /// 0-based program position.
    pub index: usize,
    pub instruction: &'a Instruction,
    pub hazards: NearbyHazards<'a>,
}

impl ReportEntry<'_> {
    /// Formats the entry as text.
    ///
    /// The first finding follows the instruction on the same line. A second
    /// finding goes on its own line, indented by `indent` spaces.
    pub fn line(&self, indent: usize) -> String {
        let mut out = self.instruction.raw().to_string();
        for (n, finding) in self.hazards.iter().enumerate() {
            if n == 0 {
                out.push_str(&format!(" {} {}", REPORT_SEPARATOR, finding));
            } else {
                out.push_str(&format!("\n{}{} {}", " ".repeat(indent), REPORT_SEPARATOR, finding));
            }
        }
        out
    }
}

/// Report entry for `program[index]`.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `program`.
pub fn report_entry(program: &[Instruction], index: usize) -> ReportEntry<'_> {
    ReportEntry {
        index,
        instruction: &program[index],
        hazards: hazards::detect_nearby(program, index),
    }
}

/// Report entries for the whole program, in order.
pub fn hazard_report(program: &[Instruction]) -> Vec<ReportEntry<'_>> {
    (0..program.len()).map(|i| report_entry(program, i)).collect()
}
