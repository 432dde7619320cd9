//! Console and JSON Rendering.
//!
//! Turns hazard report entries and timing rows into printable lines. All
//! widths come from [`RenderConfig`]; nothing here looks at the terminal.
//!
//! A timing row looks like
//!
//! ```text
//! SUB R4, R1, R5  --->         |---F---|---S---|---S---|---D---|---X---|---M---|---W---|
//! ```
//!
//! where the leading spaces are the row's offset.

use serde::Serialize;

use crate::config::RenderConfig;
use crate::core::{Forwarding, HazardKind, PipelineStage, StageKind};
use crate::isa::Instruction;
use crate::sim::{Operation, ReportEntry, TimingRow};
use crate::stats::SimStats;

/// Arrow between the instruction column and the diagram.
pub const ROW_ARROW: &str = " ---> ";

/// A line of `fill` repeated `width` times.
pub fn banner(fill: char, width: usize) -> String {
    std::iter::repeat(fill).take(width).collect()
}

/// Banner-framed section title, e.g. `- Detecting data hazards: -`.
fn section_header(title: &str, cfg: &RenderConfig) -> Vec<String> {
    vec![
        banner('-', cfg.banner_width),
        format!("- {}: -", title),
        banner('-', cfg.banner_width),
    ]
}

/// One stage cell such as `---F---`.
pub fn stage_cell(code: char, padding: usize) -> String {
    let dashes = "-".repeat(padding);
    format!("{dashes}{code}{dashes}")
}

/// The `|`-delimited cells of one row, without the leading offset.
pub fn stage_cells<'s>(stages: impl IntoIterator<Item = &'s PipelineStage>, padding: usize) -> String {
    let mut out = String::from("|");
    for stage in stages {
        out.push_str(&stage_cell(stage.short_code(), padding));
        out.push('|');
    }
    out
}

/// Formats one timing row, including its label and offset.
pub fn timing_line(row: &TimingRow<'_>, cfg: &RenderConfig) -> String {
    format!(
        "{:<width$}{}{}{}",
        row.instruction.raw(),
        ROW_ARROW,
        " ".repeat(row.offset),
        stage_cells(&row.sequence, cfg.cell_padding),
        width = cfg.label_width
    )
}

/// The hazard report section.
pub fn detect_section(entries: &[ReportEntry<'_>], cfg: &RenderConfig) -> Vec<String> {
    let mut lines = section_header("Detecting data hazards", cfg);
    lines.extend(entries.iter().map(|e| e.line(cfg.label_width)));
    lines.push(banner('-', cfg.banner_width));
    lines
}

/// The timing diagram section.
pub fn timing_section(rows: &[TimingRow<'_>], forwarding: Forwarding, cfg: &RenderConfig) -> Vec<String> {
    let title = format!(
        "Generating Timing Diagram with forwarding unit {}",
        forwarding.label()
    );
    let mut lines = section_header(&title, cfg);
    lines.extend(rows.iter().map(|r| timing_line(r, cfg)));
    lines.push(banner('-', cfg.banner_width));
    lines
}

/// Long-form listing of every row's stages and what each stage does.
pub fn describe_section(rows: &[TimingRow<'_>], cfg: &RenderConfig) -> Vec<String> {
    let mut lines = section_header("Pipeline stage descriptions", cfg);
    for row in rows {
        lines.push(format!("Instruction#{} [{}]", row.index + 1, row.instruction.raw()));
        for stage in &row.sequence {
            lines.push(format!(
                "    {} {:<10} {}",
                stage.short_code(),
                stage.long_name(),
                stage.description
            ));
        }
    }
    lines.push(banner('-', cfg.banner_width));
    lines
}

/// Full text output of a run.
pub fn text_output(
    operation: Operation,
    forwarding: Forwarding,
    report: &[ReportEntry<'_>],
    rows: &[TimingRow<'_>],
    cfg: &RenderConfig,
) -> Vec<String> {
    let mut lines = Vec::new();
    if operation.detects() {
        lines.extend(detect_section(report, cfg));
    }
    if operation == Operation::Both {
        lines.push(banner('*', cfg.banner_width));
    }
    if operation.times() {
        lines.extend(timing_section(rows, forwarding, cfg));
    }
    lines
}

#[derive(Debug, Serialize)]
pub struct JsonFinding<'a> {
    pub kind: HazardKind,
    pub distance: usize,
    pub register: &'a str,
    pub previous_register: &'a str,
    pub previous_position: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct JsonReportEntry<'a> {
    pub position: usize,
    pub instruction: &'a Instruction,
    pub hazards: Vec<JsonFinding<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonStage<'a> {
    pub stage: StageKind,
    pub code: char,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonTimingRow<'a> {
    pub position: usize,
    pub instruction: &'a str,
    pub start_cycle: usize,
    pub offset: usize,
    pub adjustment: usize,
    pub stalls: usize,
    pub stages: Vec<JsonStage<'a>>,
}

/// Machine-readable output of a run.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub operation: Operation,
    pub forwarding: Forwarding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Vec<JsonReportEntry<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Vec<JsonTimingRow<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SimStats>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(
        operation: Operation,
        forwarding: Forwarding,
        report: &'a [ReportEntry<'a>],
        rows: &'a [TimingRow<'a>],
        base_width: usize,
        stats: Option<SimStats>,
    ) -> Self {
        let report = operation.detects().then(|| {
            report
                .iter()
                .map(|e| JsonReportEntry {
                    position: e.index + 1,
                    instruction: e.instruction,
                    hazards: e
                        .hazards
                        .iter()
                        .map(|f| JsonFinding {
                            kind: f.kind,
                            distance: f.distance,
                            register: f.register.name(),
                            previous_register: f.previous_register.name(),
                            previous_position: f.previous_position,
                            message: f.to_string(),
                        })
                        .collect(),
                })
                .collect()
        });

        let timing = operation.times().then(|| {
            rows.iter()
                .map(|r| JsonTimingRow {
                    position: r.index + 1,
                    instruction: r.instruction.raw(),
                    start_cycle: r.start_cycle(base_width),
                    offset: r.offset,
                    adjustment: r.adjustment,
                    stalls: r.sequence.stall_count(),
                    stages: r
                        .sequence
                        .iter()
                        .map(|s| JsonStage {
                            stage: s.kind,
                            code: s.short_code(),
                            description: &s.description,
                        })
                        .collect(),
                })
                .collect()
        });

        Self {
            operation,
            forwarding,
            report,
            timing,
            stats,
        }
    }
}
