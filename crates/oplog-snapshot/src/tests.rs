//! Unit tests for snapshot conversion and validation.

use proptest::prelude::*;

use crate::error::SnapshotError;
use crate::fixtures::{
    FakeEdm, FakeFunction, FakeInstruction, FakeOperand, FakeRange, FakeSegment, FakeUdm,
};
use crate::host::HostInstruction;
use crate::{
    EnumMemberSnapshot, FunctionSnapshot, InstructionFields, InstructionSnapshot,
    OperandSnapshot, RangeSnapshot, SegmentFields, SegmentSnapshot, TypeMemberSnapshot,
    DEFSR_SLOTS, OPERAND_SLOTS,
};

// ── segment tests ────────────────────────────────────────────────────

#[test]
fn segment_in_domain_is_accepted() {
    let seg = SegmentSnapshot::from_host(&FakeSegment::text()).expect("segment should validate");

    assert_eq!(seg.bitness(), 2);
    assert_eq!(seg.address_bits(), 64);
    assert_eq!(seg.align(), 16);
    assert_eq!(seg.comb(), 1);
    assert_eq!(seg.perm(), 7);
    assert_eq!(seg.seg_type(), 2);
    assert_eq!(seg.flags(), 8);
    assert_eq!(seg.defsr(), &[0u64; DEFSR_SLOTS]);
    assert_eq!(seg.segment_name(), Some(".text"));
    assert_eq!(seg.size(), 0x1000);
}

#[test]
fn segment_bitness_three_is_rejected() {
    let mut host = FakeSegment::text();
    host.bitness = 3;

    let err = SegmentSnapshot::from_host(&host).expect_err("bitness 3 should fail");
    assert_eq!(err, SnapshotError::InvalidBitness(3));
    assert_eq!(err.field(), "bitness");
    assert!(err.to_string().contains("got 3"));
}

#[test]
fn segment_out_of_range_names_field_and_value() {
    let mut host = FakeSegment::text();
    host.perm = 256;

    let err = SegmentSnapshot::from_host(&host).expect_err("perm 256 should fail");
    assert_eq!(
        err,
        SnapshotError::OutOfRange {
            field: "perm",
            value: 256,
            min: 0,
            max: 255,
        }
    );
    assert_eq!(err.to_string(), "perm must be in range 0-255, got 256");
}

#[test]
fn segment_flags_accept_full_word() {
    let mut host = FakeSegment::text();
    host.flags = 65535;
    assert!(SegmentSnapshot::from_host(&host).is_ok());

    host.flags = 65536;
    let err = SegmentSnapshot::from_host(&host).expect_err("flags 65536 should fail");
    assert_eq!(err.field(), "flags");
}

#[test]
fn segment_short_defsr_is_rejected() {
    let mut host = FakeSegment::text();
    host.defsr.truncate(15);

    let err = SegmentSnapshot::from_host(&host).expect_err("15 defsr slots should fail");
    assert_eq!(
        err,
        SnapshotError::WrongLength {
            field: "defsr",
            expected: 16,
            actual: 15,
        }
    );
}

#[test]
fn segment_absent_names_stay_absent() {
    let mut host = FakeSegment::text();
    host.segment_name = None;
    host.segment_class = None;

    let seg = SegmentSnapshot::from_host(&host).expect("segment should validate");
    assert_eq!(seg.segment_name(), None);

    let json = serde_json::to_value(&seg).expect("should serialize");
    assert!(json["segment_name"].is_null());
    assert!(json["segment_class"].is_null());
    assert_eq!(json["type"], 2);
}

#[test]
fn segment_json_round_trip() {
    let seg = SegmentSnapshot::from_host(&FakeSegment::text()).expect("segment should validate");
    let json = serde_json::to_string(&seg).expect("should serialize");
    let restored: SegmentSnapshot = serde_json::from_str(&json).expect("should deserialize");
    assert_eq!(restored, seg);
}

#[test]
fn segment_deserialize_runs_validation() {
    let seg = SegmentSnapshot::from_host(&FakeSegment::text()).expect("segment should validate");
    let mut json = serde_json::to_value(&seg).expect("should serialize");
    json["bitness"] = serde_json::json!(7);

    let err = serde_json::from_value::<SegmentSnapshot>(json).expect_err("bitness 7 should fail");
    assert!(err.to_string().contains("bitness"), "error was: {err}");
}

#[test]
fn segment_fields_survive_snapshot_round_trip() {
    let fields = SegmentFields::read(&FakeSegment::text());
    let seg = SegmentSnapshot::try_from(fields.clone()).expect("segment should validate");
    assert_eq!(SegmentFields::from(seg), fields);
}

// ── instruction tests ────────────────────────────────────────────────

#[test]
fn instruction_pads_missing_operands_with_void() {
    let insn = InstructionSnapshot::from_host(&FakeInstruction::mov_imm(0x402010))
        .expect("instruction should convert");

    assert_eq!(insn.ea(), 0x402010);
    assert_eq!(insn.ops().len(), OPERAND_SLOTS);
    assert!(!insn.ops()[0].is_void());
    assert!(!insn.ops()[1].is_void());
    for slot in 2..OPERAND_SLOTS {
        assert!(insn.ops()[slot].is_void(), "slot {slot} should be void");
        assert_eq!(usize::from(insn.ops()[slot].n), slot);
    }
    assert_eq!(insn.used_ops().count(), 2);
}

#[test]
fn instruction_auxpref_views_alias_storage() {
    let host = FakeInstruction::mov_imm(0x402010);
    let insn = InstructionSnapshot::from_host(&host).expect("instruction should convert");

    assert_eq!(insn.auxpref_u8(), host.auxpref.to_ne_bytes());
    assert_eq!(insn.auxpref_u16(), host.auxpref_u16());
    let b = insn.auxpref_u8();
    assert_eq!(insn.auxpref_u16()[0], u16::from_ne_bytes([b[0], b[1]]));
}

#[test]
fn instruction_rejects_misplaced_operand() {
    let mut host = FakeInstruction::mov_imm(0x402010);
    host.ops[1].n = 5;

    let err = InstructionSnapshot::from_host(&host).expect_err("misplaced operand should fail");
    assert_eq!(err, SnapshotError::OperandIndexMismatch { slot: 1, index: 5 });
}

#[test]
fn instruction_fields_with_seven_operands_are_rejected() {
    let insn = InstructionSnapshot::from_host(&FakeInstruction::mov_imm(0x402010))
        .expect("instruction should convert");
    let mut fields = InstructionFields::from(insn);
    fields.ops.pop();

    let err = InstructionSnapshot::try_from(fields).expect_err("7 operands should fail");
    assert_eq!(
        err,
        SnapshotError::WrongLength {
            field: "ops",
            expected: 8,
            actual: 7,
        }
    );
}

#[test]
fn instruction_json_round_trip_keeps_eight_operands() {
    let insn = InstructionSnapshot::from_host(&FakeInstruction::mov_imm(0x402010))
        .expect("instruction should convert");
    let json = serde_json::to_value(&insn).expect("should serialize");
    assert_eq!(json["ops"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["ops"][1]["type"], 5);

    let restored: InstructionSnapshot = serde_json::from_value(json).expect("should deserialize");
    assert_eq!(restored, insn);
}

#[test]
fn void_operand_is_all_zero_but_index() {
    let op = OperandSnapshot::void(6);
    assert_eq!(op.n, 6);
    assert!(op.is_void());
    assert_eq!(op.value, 0);
    assert_eq!(op.addr, 0);
}

// ── function, range and member tests ─────────────────────────────────

#[test]
fn function_copies_every_field() {
    let host = FakeFunction::sample(0x401000, "main");
    let func = FunctionSnapshot::from_host(&host);

    assert_eq!(func.start_ea, 0x401000);
    assert_eq!(func.end_ea, 0x401040);
    assert_eq!(func.frsize, 0x18);
    assert_eq!(func.frregs, 8);
    assert_eq!(func.name.as_deref(), Some("main"));
    assert!(func.contains(0x401020));
    assert!(!func.contains(0x401040));
}

#[test]
fn function_without_name_serializes_null() {
    let mut host = FakeFunction::sample(0x401000, "main");
    host.name = None;
    let func = FunctionSnapshot::from_host(&host);

    let json = serde_json::to_value(&func).expect("should serialize");
    assert!(json["name"].is_null());
    assert_ne!(json["name"], serde_json::json!(""));
}

#[test]
fn converting_twice_yields_equal_snapshots() {
    let host = FakeFunction::sample(0x401000, "main");
    assert_eq!(
        FunctionSnapshot::from_host(&host),
        FunctionSnapshot::from_host(&host)
    );

    let seg = FakeSegment::text();
    assert_eq!(
        SegmentSnapshot::from_host(&seg).expect("should validate"),
        SegmentSnapshot::from_host(&seg).expect("should validate")
    );

    let insn = FakeInstruction::mov_imm(0x402010);
    assert_eq!(
        InstructionSnapshot::from_host(&insn).expect("should convert"),
        InstructionSnapshot::from_host(&insn).expect("should convert")
    );

    let range = FakeRange {
        start_ea: 0x401000,
        end_ea: 0x401010,
    };
    assert_eq!(RangeSnapshot::from_host(&range), RangeSnapshot::from_host(&range));

    let udm = FakeUdm::sample("field_0", 0);
    assert_eq!(
        TypeMemberSnapshot::from_host(&udm).expect("should convert"),
        TypeMemberSnapshot::from_host(&udm).expect("should convert")
    );

    let edm = FakeEdm::sample("RED", 1);
    assert_eq!(
        EnumMemberSnapshot::from_host(&edm).expect("should convert"),
        EnumMemberSnapshot::from_host(&edm).expect("should convert")
    );
}

#[test]
fn range_length() {
    let range = RangeSnapshot::from_host(&FakeRange {
        start_ea: 0x401000,
        end_ea: 0x401010,
    });
    assert_eq!(range.len(), 0x10);
    assert!(!range.is_empty());
}

#[test]
fn type_member_keeps_empty_comment_as_string() {
    let udm = TypeMemberSnapshot::from_host(&FakeUdm::sample("field_0", 0))
        .expect("member should convert");
    assert_eq!(udm.name, "field_0");
    assert_eq!(udm.cmt, "");
    assert_eq!(udm.tid, 0xff00_0000_0000_0101);
}

#[test]
fn type_member_unresolvable_tid_is_conversion_failure() {
    let mut host = FakeUdm::sample("field_0", 0);
    host.tid = None;

    let err = TypeMemberSnapshot::from_host(&host).expect_err("tid failure should surface");
    assert!(matches!(err, SnapshotError::HostRead { snapshot: "type member", .. }));
    assert_eq!(err.field(), "tid");
    assert!(!err.is_validation());
}

#[test]
fn enum_member_converts() {
    let edm = EnumMemberSnapshot::from_host(&FakeEdm::sample("RED", 1)).expect("should convert");
    assert_eq!(edm.name, "RED");
    assert_eq!(edm.value, 1);

    let mut host = FakeEdm::sample("GREEN", 2);
    host.tid = None;
    assert!(EnumMemberSnapshot::from_host(&host).is_err());
}

// ── properties ───────────────────────────────────────────────────────

fn segment_with(
    align: i64,
    comb: i64,
    perm: i64,
    bitness: i64,
    flags: i64,
    seg_type: i64,
    defsr_len: usize,
) -> FakeSegment {
    FakeSegment {
        align,
        comb,
        perm,
        bitness,
        flags,
        seg_type,
        defsr: vec![0; defsr_len],
        ..FakeSegment::text()
    }
}

proptest! {
    /// Segment construction fails exactly when a range or length rule is broken.
    #[test]
    fn segment_validation_iff_rules_hold(
        align in -4i64..300,
        comb in -4i64..300,
        perm in -4i64..300,
        bitness in -2i64..5,
        flags in -4i64..70_000,
        seg_type in -4i64..300,
        defsr_len in 0usize..20,
    ) {
        let byte = 0..=255i64;
        let valid = (0..=2).contains(&bitness)
            && byte.contains(&align)
            && byte.contains(&comb)
            && byte.contains(&perm)
            && byte.contains(&seg_type)
            && (0..=65_535).contains(&flags)
            && defsr_len == DEFSR_SLOTS;

        let host = segment_with(align, comb, perm, bitness, flags, seg_type, defsr_len);
        prop_assert_eq!(SegmentSnapshot::from_host(&host).is_ok(), valid);
    }

    /// Whatever number of operands the binding exposes, the snapshot has eight.
    #[test]
    fn instruction_always_has_eight_operands(exposed in 0usize..=8, imm in any::<u64>()) {
        let mut host = FakeInstruction::mov_imm(0x402010);
        host.ops = (0..exposed).map(|n| FakeOperand::imm(n as u8, imm)).collect();

        let insn = InstructionSnapshot::from_host(&host).expect("instruction should convert");
        prop_assert_eq!(insn.ops().len(), OPERAND_SLOTS);
        prop_assert_eq!(insn.used_ops().count(), exposed);
        for (slot, op) in insn.ops().iter().enumerate() {
            prop_assert_eq!(usize::from(op.n), slot);
        }
    }
}
