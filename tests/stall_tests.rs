//! Integration tests for the stall policy.

use mips_pipeline_sim::core::pipeline::hazards::{detect_nearby, HazardKind};
use mips_pipeline_sim::core::pipeline::stalls::*;
use mips_pipeline_sim::isa::{parse_commands, OpClass};

const CLASSES: [OpClass; 3] = [OpClass::Alu, OpClass::Load, OpClass::Store];

/// Tests every row of the no-forwarding table at distance 1.
#[test]
fn test_no_forwarding_table() {
    use HazardKind::*;
    use OpClass::*;
    let expected = [
        (War, Load, Store, 1),
        (War, Alu, Alu, 2),
        (War, Load, Alu, 2),
        (Raw, Alu, Alu, 2),
        (Raw, Load, Store, 1),
        (Raw, Store, Load, 1),
        (Raw, Store, Alu, 2),
        (Raw, Alu, Load, 1),
        (Waw, Alu, Alu, 2),
        (Waw, Load, Load, 1),
        (Waw, Load, Alu, 2),
        (Waw, Alu, Load, 2),
    ];
    for (kind, cur, prev, stalls) in expected {
        assert_eq!(
            stall_count(cur, prev, kind, Forwarding::Off, 1),
            stalls,
            "{kind} {cur:?},{prev:?}"
        );
    }
}

/// Tests that combinations absent from the table insert nothing.
#[test]
fn test_no_forwarding_unlisted_combinations() {
    assert_eq!(stall_count(OpClass::Store, OpClass::Store, HazardKind::Raw, Forwarding::Off, 1), 0);
    assert_eq!(stall_count(OpClass::Alu, OpClass::Store, HazardKind::War, Forwarding::Off, 1), 0);
    assert_eq!(stall_count(OpClass::Store, OpClass::Load, HazardKind::Waw, Forwarding::Off, 1), 0);
}

/// Tests that only the load/store RAW rows are limited to distance 1.
#[test]
fn test_no_forwarding_distance_two() {
    assert_eq!(stall_count(OpClass::Load, OpClass::Store, HazardKind::Raw, Forwarding::Off, 2), 0);
    assert_eq!(stall_count(OpClass::Store, OpClass::Load, HazardKind::Raw, Forwarding::Off, 2), 0);
    assert_eq!(stall_count(OpClass::Alu, OpClass::Alu, HazardKind::Raw, Forwarding::Off, 2), 2);
    assert_eq!(stall_count(OpClass::Alu, OpClass::Load, HazardKind::Raw, Forwarding::Off, 2), 1);
    // WAR and WAW rows still apply to the distance-2 predecessor.
    assert_eq!(stall_count(OpClass::Alu, OpClass::Alu, HazardKind::War, Forwarding::Off, 2), 2);
    assert_eq!(stall_count(OpClass::Load, OpClass::Load, HazardKind::Waw, Forwarding::Off, 2), 1);
}

/// Tests that the forwarding table only stalls for its three rows at distance 1.
#[test]
fn test_forwarding_table_is_sparse() {
    let stalling = [
        (HazardKind::War, OpClass::Load, OpClass::Store),
        (HazardKind::Raw, OpClass::Alu, OpClass::Load),
        (HazardKind::Waw, OpClass::Load, OpClass::Load),
    ];
    for kind in HazardKind::ALL {
        for cur in CLASSES {
            for prev in CLASSES {
                for distance in [1, 2] {
                    let expected = usize::from(distance == 1 && stalling.contains(&(kind, cur, prev)));
                    assert_eq!(
                        stall_count(cur, prev, kind, Forwarding::On, distance),
                        expected,
                        "{kind} {cur:?},{prev:?} at distance {distance}"
                    );
                }
            }
        }
    }
}

/// Tests that the lookup is a pure function of its inputs.
#[test]
fn test_lookup_is_pure() {
    for forwarding in [Forwarding::On, Forwarding::Off] {
        for kind in HazardKind::ALL {
            for cur in CLASSES {
                for prev in CLASSES {
                    let first = stall_count(cur, prev, kind, forwarding, 1);
                    let second = stall_count(cur, prev, kind, forwarding, 1);
                    assert_eq!(first, second);
                }
            }
        }
    }
}

/// Tests that no rule ever asks for more than two stalls.
#[test]
fn test_stall_rules_bounded() {
    assert!(STALL_RULES.iter().all(|r| (1..=2).contains(&r.stalls)));
}

/// Tests that the distance-2 finding governs and stalls never combine.
#[test]
fn test_distance_two_precedence_without_forwarding() {
    // i2 vs i1: RAW ALU/ALU (2 stalls). i2 vs i0: RAW ALU/LW (1 stall).
    let program = parse_commands("LW R1, 0(R2) | ADD R3, R1, R4 | ADD R5, R3, R1").unwrap();
    let nearby = detect_nearby(&program, 2);
    assert!(nearby.adjacent.is_some());
    assert!(nearby.distant.is_some());

    assert_eq!(governing(&nearby).unwrap().distance, 2);
    assert_eq!(select_stalls(&nearby, Forwarding::Off), 1);
}

/// Tests that a distance-2 finding suppresses a stalling distance-1 finding
/// even when the distance-2 rule inserts nothing.
#[test]
fn test_distance_two_precedence_with_forwarding() {
    // i2 vs i1 is a load-use RAW (1 stall alone); i2 vs i0 is RAW ALU/ALU (0 with forwarding).
    let program = parse_commands("ADD R1, R2, R3 | LW R4, 0(R5) | ADD R6, R4, R1").unwrap();
    let nearby = detect_nearby(&program, 2);
    let adjacent = nearby.adjacent.as_ref().unwrap();
    assert_eq!(stalls_for(adjacent, Forwarding::On), 1);
    assert_eq!(select_stalls(&nearby, Forwarding::On), 0);
}

/// Tests the distance-1 fallback when there is no distance-2 finding.
#[test]
fn test_distance_one_fallback() {
    let program = parse_commands("LW R1, 0(R2) | ADD R3, R1, R4").unwrap();
    let nearby = detect_nearby(&program, 1);
    assert_eq!(select_stalls(&nearby, Forwarding::On), 1);
    assert_eq!(select_stalls(&nearby, Forwarding::Off), 1);

    let clean = parse_commands("ADD R1, R2, R3 | ADD R4, R5, R6").unwrap();
    assert_eq!(select_stalls(&detect_nearby(&clean, 1), Forwarding::Off), 0);
}
