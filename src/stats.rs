//! Run statistics.
//!
//! Summarizes a run: how many hazards the report found, how many stall
//! cycles the timing diagram inserted, and how many cycles the program takes
//! from the first Fetch to the last Write Back.

use serde::Serialize;

use crate::core::HazardKind;
use crate::sim::{ReportEntry, TimingRow};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub instructions: usize,

    pub hazards_raw: usize,
    pub hazards_war: usize,
    pub hazards_waw: usize,

    /// Stall stages across all rows of the timing diagram.
    pub stalls: usize,
    /// Cycles until the last instruction leaves Write Back.
    pub cycles: usize,
}

impl SimStats {
    /// Collects statistics from a hazard report and the matching timing rows.
    pub fn collect(report: &[ReportEntry<'_>], rows: &[TimingRow<'_>], base_width: usize) -> Self {
        let mut stats = Self {
            instructions: report.len().max(rows.len()),
            ..Self::default()
        };

        for finding in report.iter().flat_map(|e| e.hazards.iter()) {
            match finding.kind {
                HazardKind::Raw => stats.hazards_raw += 1,
                HazardKind::War => stats.hazards_war += 1,
                HazardKind::Waw => stats.hazards_waw += 1,
            }
        }

        stats.stalls = rows.iter().map(|r| r.sequence.stall_count()).sum();
        stats.cycles = rows
            .iter()
            .map(|r| r.end_cycle(base_width))
            .max()
            .unwrap_or(0);
        stats
    }

    pub fn hazards(&self) -> usize {
        self.hazards_raw + self.hazards_war + self.hazards_waw
    }

    /// Cycles per instruction; zero for an empty program.
    pub fn cpi(&self) -> f64 {
        if self.instructions == 0 {
            return 0.0;
        }
        self.cycles as f64 / self.instructions as f64
    }

    /// Formatted summary lines.
    pub fn lines(&self) -> Vec<String> {
        vec![
            "PIPELINE STATISTICS".to_string(),
            format!("  sim_insts              {}", self.instructions),
            format!("  sim_cycles             {}", self.cycles),
            format!("  sim_cpi                {:.4}", self.cpi()),
            format!("  stalls.data            {}", self.stalls),
            format!("  hazards.total          {}", self.hazards()),
            format!("  hazards.raw            {}", self.hazards_raw),
            format!("  hazards.war            {}", self.hazards_war),
            format!("  hazards.waw            {}", self.hazards_waw),
        ]
    }
}
