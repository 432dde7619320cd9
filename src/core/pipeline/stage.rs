//! Pipeline Stages and Sequences.
//!
//! Every instruction passes through Fetch, Decode, Execute, Memory and Write
//! Back. Stalls are modeled as extra `Stall` stages placed right after Fetch,
//! so a stalled instruction's Decode starts later in the timing diagram.

use serde::Serialize;

use crate::common::Register;
use crate::isa::{Instruction, OpClass};

/// Index at which stall stages are inserted (immediately after Fetch).
pub const STALL_INSERT_POSITION: usize = 1;

/// Kind of pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StageKind {
    Fetch,
    Decode,
    Execute,
    Memory,
    WriteBack,
    /// Timing placeholder with no instruction semantics.
    Stall,
}

impl StageKind {
    /// The five stages every instruction runs through, in order.
    pub const CANONICAL: [StageKind; 5] = [
        StageKind::Fetch,
        StageKind::Decode,
        StageKind::Execute,
        StageKind::Memory,
        StageKind::WriteBack,
    ];

    pub fn long_name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::WriteBack => "Write Back",
            Self::Stall => "Stall",
        }
    }

    /// One-letter code drawn in the timing diagram.
    pub fn short_code(self) -> char {
        match self {
            Self::Fetch => 'F',
            Self::Decode => 'D',
            Self::Execute => 'X',
            Self::Memory => 'M',
            Self::WriteBack => 'W',
            Self::Stall => 'S',
        }
    }
}

/// A stage of one instruction, with a description of what it does for that
/// instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineStage {
    pub kind: StageKind,
    pub description: String,
}

impl PipelineStage {
    pub fn stall() -> Self {
        Self {
            kind: StageKind::Stall,
            description: "Stall instruction".to_string(),
        }
    }

    /// Builds a canonical stage, describing it in terms of `inst`.
    fn describe(kind: StageKind, inst: &Instruction) -> Self {
        let description = match kind {
            StageKind::Fetch => format!("Fetch instruction - {}", inst.raw()),
            StageKind::Decode => format!(
                "Decode instruction - {} and register contents - {}",
                inst.opcode(),
                decode_operands(inst)
            ),
            StageKind::Execute => format!("Execute instruction - {}", inst.opcode()),
            StageKind::Memory => format!("Memory operations - {}", memory_effect(inst)),
            StageKind::WriteBack => {
                format!("Write back operations - {}", write_back_effect(inst))
            }
            StageKind::Stall => return Self::stall(),
        };
        Self { kind, description }
    }

    pub fn long_name(&self) -> &'static str {
        self.kind.long_name()
    }

    pub fn short_code(&self) -> char {
        self.kind.short_code()
    }

    pub fn is_stall(&self) -> bool {
        self.kind == StageKind::Stall
    }
}

fn reg_name(reg: Option<&Register>) -> &str {
    reg.map_or("", |r| r.name())
}

fn decode_operands(inst: &Instruction) -> String {
    let (rs, rt) = (reg_name(inst.rs()), reg_name(inst.rt()));
    match inst.class() {
        OpClass::Alu => format!("{},{},{}", rs, rt, reg_name(inst.rd())),
        OpClass::Load | OpClass::Store => format!("{},{}", rs, rt),
    }
}

fn memory_effect(inst: &Instruction) -> String {
    let offset = inst.offset().unwrap_or("");
    match inst.class() {
        OpClass::Load => format!(
            "Value of effective address - {} and offset {} is read",
            reg_name(inst.rs()),
            offset
        ),
        OpClass::Store => format!(
            "Value of Register {} is written to effective address- {} and offset {}",
            reg_name(inst.rs()),
            reg_name(inst.rt()),
            offset
        ),
        OpClass::Alu => String::new(),
    }
}

fn write_back_effect(inst: &Instruction) -> String {
    match inst.class() {
        OpClass::Load => format!(
            "Value of effective address - {} and offset {} is written to {}",
            reg_name(inst.rs()),
            inst.offset().unwrap_or(""),
            reg_name(inst.rt())
        ),
        OpClass::Store => "Nothing to write back!".to_string(),
        OpClass::Alu => String::new(),
    }
}

/// The ordered stages of one instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PipelineSequence {
    stages: Vec<PipelineStage>,
}

impl PipelineSequence {
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PipelineStage> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stall_count(&self) -> usize {
        self.stages.iter().filter(|s| s.is_stall()).count()
    }

    /// Stage codes in order, e.g. `"FSDXMW"`.
    pub fn codes(&self) -> String {
        self.stages.iter().map(PipelineStage::short_code).collect()
    }
}

impl<'a> IntoIterator for &'a PipelineSequence {
    type Item = &'a PipelineStage;
    type IntoIter = std::slice::Iter<'a, PipelineStage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

/// Builds the canonical five-stage sequence for `inst`.
pub fn build(inst: &Instruction) -> PipelineSequence {
    build_with_stalls(inst, 0)
}

/// Builds the sequence for `inst` with `stalls` Stall stages between Fetch
/// and Decode.
pub fn build_with_stalls(inst: &Instruction, stalls: usize) -> PipelineSequence {
    let canonical: Vec<PipelineStage> = StageKind::CANONICAL
        .iter()
        .map(|&kind| PipelineStage::describe(kind, inst))
        .collect();

    let (head, tail) = canonical.split_at(STALL_INSERT_POSITION);
    let stages = head
        .iter()
        .cloned()
        .chain(std::iter::repeat_with(PipelineStage::stall).take(stalls))
        .chain(tail.iter().cloned())
        .collect();

    PipelineSequence { stages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_descriptions() {
        let inst = Instruction::load("R1", "4", "R2", "LW R1, 4(R2)");
        let seq = build(&inst);
        let desc: Vec<&str> = seq.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(desc[0], "Fetch instruction - LW R1, 4(R2)");
        assert_eq!(desc[1], "Decode instruction - LW and register contents - R2,R1");
        assert_eq!(desc[2], "Execute instruction - LW");
        assert_eq!(
            desc[3],
            "Memory operations - Value of effective address - R2 and offset 4 is read"
        );
        assert_eq!(
            desc[4],
            "Write back operations - Value of effective address - R2 and offset 4 is written to R1"
        );
    }

    #[test]
    fn test_alu_descriptions_are_empty_for_memory() {
        let inst = Instruction::add("R1", "R2", "R3", "ADD R1, R2, R3");
        let seq = build(&inst);
        assert_eq!(
            seq.stages()[1].description,
            "Decode instruction - ADD and register contents - R2,R3,R1"
        );
        assert_eq!(seq.stages()[3].description, "Memory operations - ");
        assert_eq!(seq.stages()[4].description, "Write back operations - ");
    }
}
