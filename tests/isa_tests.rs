//! Integration tests for the instruction model and command parser.

use mips_pipeline_sim::common::SimError;
use mips_pipeline_sim::isa::parse::parse_instruction;
use mips_pipeline_sim::isa::*;

/// Tests ADD parsing with lowercase input.
#[test]
fn test_parse_add_lowercase() {
    let inst = parse_instruction("add r1, r2, r3", 1).unwrap();
    assert_eq!(inst.opcode(), Opcode::Add);
    assert_eq!(inst.class(), OpClass::Alu);
    assert_eq!(inst.rd().unwrap().name(), "R1");
    assert_eq!(inst.rs().unwrap().name(), "R2");
    assert_eq!(inst.rt().unwrap().name(), "R3");
    assert!(inst.offset().is_none());
}

/// Tests that operands without spaces after commas are accepted.
#[test]
fn test_parse_compact_operands() {
    let inst = parse_instruction("SUB R4,R1,R5", 1).unwrap();
    assert_eq!(inst.opcode(), Opcode::Sub);
    assert_eq!(inst.rd().unwrap().name(), "R4");
    assert_eq!(inst.rt().unwrap().name(), "R5");
}

/// Tests LW operand roles: rt is the destination, rs the base.
#[test]
fn test_parse_load() {
    let inst = parse_instruction("LW R1, 0(R2)", 1).unwrap();
    assert_eq!(inst.opcode(), Opcode::Lw);
    assert_eq!(inst.rt().unwrap().name(), "R1");
    assert_eq!(inst.rs().unwrap().name(), "R2");
    assert_eq!(inst.offset(), Some("0"));
    assert!(inst.rd().is_none());
}

/// Tests SW operand roles: rs is stored, rt is the base.
#[test]
fn test_parse_store() {
    let inst = parse_instruction("sw r3, 8(r4)", 1).unwrap();
    assert_eq!(inst.opcode(), Opcode::Sw);
    assert_eq!(inst.rs().unwrap().name(), "R3");
    assert_eq!(inst.rt().unwrap().name(), "R4");
    assert_eq!(inst.offset(), Some("8"));
    assert!(inst.rd().is_none());
}

/// Tests that an empty offset is allowed.
#[test]
fn test_parse_empty_offset() {
    let inst = parse_instruction("LW R1, (R2)", 1).unwrap();
    assert_eq!(inst.offset(), Some(""));
    assert_eq!(inst.rs().unwrap().name(), "R2");
}

/// Tests that program order and raw text are preserved.
#[test]
fn test_parse_commands_order_and_raw() {
    let program = parse_commands(" ADD R1, R2, R3 | LW R4, 0(R1) |SW R4, 4(R2)").unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program[0].raw(), "ADD R1, R2, R3");
    assert_eq!(program[1].raw(), "LW R4, 0(R1)");
    assert_eq!(program[2].raw(), "SW R4, 4(R2)");
    assert_eq!(program[2].to_string(), "SW R4, 4(R2)");
}

/// Tests that unsupported opcodes are fatal.
#[test]
fn test_unsupported_opcode() {
    let err = parse_commands("ADD R1, R2, R3 | MUL R4, R1, R5").unwrap_err();
    match &err {
        SimError::UnsupportedOpcode { opcode, position, .. } => {
            assert_eq!(opcode, "MUL");
            assert_eq!(*position, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("not supported"));
}

/// Tests that a missing operand is reported.
#[test]
fn test_missing_operand() {
    let err = parse_commands("ADD R1, R2").unwrap_err();
    assert!(matches!(err, SimError::MissingOperand { position: 1, .. }));
}

/// Tests that a memory operand without parentheses is rejected.
#[test]
fn test_malformed_memory_operand() {
    let err = parse_commands("LW R1, R2").unwrap_err();
    assert!(matches!(err, SimError::MalformedMemoryOperand { .. }));
}

/// Tests that an empty segment is rejected.
#[test]
fn test_empty_segment() {
    let err = parse_commands("ADD R1, R2, R3 |").unwrap_err();
    assert!(matches!(err, SimError::EmptyInstruction(2)));
}

/// Tests that a blank command string is rejected.
#[test]
fn test_blank_commands() {
    assert!(matches!(parse_commands("   ").unwrap_err(), SimError::NoInstructions));
}

/// Tests opcode mnemonic lookup.
#[test]
fn test_opcode_mnemonics() {
    assert_eq!(Opcode::from_mnemonic("lw"), Some(Opcode::Lw));
    assert_eq!(Opcode::from_mnemonic("BEQ"), None);
    assert_eq!(Opcode::Sub.to_string(), "SUB");
    assert_eq!(Opcode::Sw.class(), OpClass::Store);
}
