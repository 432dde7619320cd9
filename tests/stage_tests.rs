//! Integration tests for stage sequence construction.

use mips_pipeline_sim::core::pipeline::schedule;
use mips_pipeline_sim::core::pipeline::stage::{build, build_with_stalls, STALL_INSERT_POSITION};
use mips_pipeline_sim::core::{Forwarding, StageKind};
use mips_pipeline_sim::isa::{parse_commands, Instruction};

/// Tests the canonical five-stage sequence.
#[test]
fn test_build_canonical() {
    let inst = Instruction::sub("R4", "R1", "R5", "SUB R4, R1, R5");
    let seq = build(&inst);
    assert_eq!(seq.len(), 5);
    assert_eq!(seq.codes(), "FDXMW");
    assert_eq!(seq.stall_count(), 0);
    let kinds: Vec<StageKind> = seq.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, StageKind::CANONICAL.to_vec());
}

/// Tests that stalls land right after Fetch.
#[test]
fn test_build_with_stalls() {
    let inst = Instruction::add("R1", "R2", "R3", "ADD R1, R2, R3");
    let seq = build_with_stalls(&inst, 2);
    assert_eq!(seq.len(), 7);
    assert_eq!(seq.codes(), "FSSDXMW");
    assert_eq!(seq.stall_count(), 2);
    assert_eq!(seq.stages()[STALL_INSERT_POSITION].description, "Stall instruction");
    assert!(seq.stages()[STALL_INSERT_POSITION + 1].is_stall());
    assert_eq!(seq.stages()[STALL_INSERT_POSITION + 2].kind, StageKind::Decode);
}

/// Tests that zero stalls matches the canonical sequence.
#[test]
fn test_build_with_zero_stalls() {
    let inst = Instruction::load("R1", "0", "R2", "LW R1, 0(R2)");
    assert_eq!(build_with_stalls(&inst, 0), build(&inst));
}

/// Tests store stage descriptions.
#[test]
fn test_store_descriptions() {
    let inst = Instruction::store("R1", "8", "R2", "SW R1, 8(R2)");
    let seq = build(&inst);
    assert_eq!(seq.stages()[0].description, "Fetch instruction - SW R1, 8(R2)");
    assert_eq!(seq.stages()[2].description, "Execute instruction - SW");
    assert_eq!(
        seq.stages()[3].description,
        "Memory operations - Value of Register R1 is written to effective address- R2 and offset 8"
    );
    assert_eq!(
        seq.stages()[4].description,
        "Write back operations - Nothing to write back!"
    );
}

/// Tests long names and short codes.
#[test]
fn test_stage_names() {
    assert_eq!(StageKind::WriteBack.long_name(), "Write Back");
    assert_eq!(StageKind::WriteBack.short_code(), 'W');
    assert_eq!(StageKind::Execute.short_code(), 'X');
    assert_eq!(StageKind::Stall.short_code(), 'S');
}

/// Tests scheduling of a program without hazards.
#[test]
fn test_schedule_without_hazards() {
    let program = parse_commands("ADD R1, R2, R3 | SUB R4, R5, R6 | LW R7, 0(R8)").unwrap();
    for index in 0..program.len() {
        for forwarding in [Forwarding::On, Forwarding::Off] {
            let (seq, nearby) = schedule(&program, index, forwarding);
            assert!(nearby.is_empty());
            assert_eq!(seq.codes(), "FDXMW");
        }
    }
}

/// Tests that a load-use hazard stalls once in both modes.
#[test]
fn test_schedule_load_use() {
    let program = parse_commands("LW R1, 0(R2) | ADD R3, R1, R4").unwrap();
    let (on, _) = schedule(&program, 1, Forwarding::On);
    let (off, _) = schedule(&program, 1, Forwarding::Off);
    assert_eq!(on.codes(), "FSDXMW");
    assert_eq!(off.codes(), "FSDXMW");
}
