//! Program loading and the drivers that walk a program in order.
//!
//! The hazard report and the timing diagram are both produced by iterating
//! the program once, front to back. Neither driver performs I/O; the
//! [`crate::render`] module turns their output into text or JSON.

/// Program loading from command strings and files.
pub mod loader;

/// Per-instruction hazard report.
pub mod report;

/// Timing diagram rows and the stall offset carried between them.
pub mod timing;

pub use report::{hazard_report, ReportEntry};
pub use timing::{timing_rows, TimingCarry, TimingRow};

use serde::Serialize;

/// What a run produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Hazard report only.
    Detect,
    /// Timing diagram only.
    Timing,
    /// Hazard report followed by the timing diagram.
    Both,
}

impl Operation {
    pub fn detects(self) -> bool {
        matches!(self, Self::Detect | Self::Both)
    }

    pub fn times(self) -> bool {
        matches!(self, Self::Timing | Self::Both)
    }
}
