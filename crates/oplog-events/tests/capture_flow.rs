//! End-to-end capture tests driven through the host fakes.

use std::collections::BTreeSet;

use oplog_events::{
    capture, CaptureConfig, CaptureError, EventJournal, EventKind, EventPayload, OplogEvent,
    Recorder,
};
use oplog_snapshot::fixtures::{
    FakeEdm, FakeFunction, FakeInstruction, FakeLocation, FakeRange, FakeSegment, FakeUdm,
};
use oplog_snapshot::SnapshotError;
use oplog_types::{ExtlangChange, OpaqueValue};

fn range() -> FakeRange {
    FakeRange {
        start_ea: 0x401000,
        end_ea: 0x401010,
    }
}

/// Captures one event of every kind, in declaration order.
fn one_of_each() -> Vec<OplogEvent> {
    let seg = FakeSegment::text();
    let func = FakeFunction::sample(0x401000, "main");
    let tail = FakeFunction::sample(0x405000, "main_tail");
    let insn = FakeInstruction::mov_imm(0x402010);
    let udm = FakeUdm::sample("field_0", 0);
    let udm_new = FakeUdm::sample("count", 0);
    let edm = FakeEdm::sample("RED", 0);
    let edm_new = FakeEdm::sample("CRIMSON", 0);
    let tbv = OpaqueValue::List(vec![OpaqueValue::Unsigned(0x401000)]);
    let ty = OpaqueValue::Bytes(vec![0x0d, 0x01, 0x07]);

    let results = vec![
        capture::adding_segm(&seg),
        capture::segm_added(&seg),
        capture::deleting_segm(0x401000),
        capture::segm_deleted(0x401000, 0x402000, 0),
        capture::changing_segm_start(&seg, 0x400000, 0),
        capture::segm_start_changed(&seg, 0x401000),
        capture::changing_segm_end(&seg, 0x403000, 0),
        capture::segm_end_changed(&seg, 0x402000),
        capture::changing_segm_name(&seg, ".text"),
        capture::segm_name_changed(&seg, ".code"),
        capture::changing_segm_class(&seg),
        capture::segm_class_changed(&seg, "CODE"),
        capture::segm_attrs_updated(&seg),
        capture::segm_moved(0x401000, 0x501000, 0x1000, false),
        capture::allsegs_moved(OpaqueValue::Unsigned(0x100000)),
        capture::func_added(&func),
        capture::func_updated(&func),
        capture::set_func_start(&func, 0x400ff0),
        capture::set_func_end(&func, 0x401080),
        capture::deleting_func(&func),
        capture::func_deleted(0x401000),
        capture::thunk_func_created(&func),
        capture::func_tail_appended(&func, &tail),
        capture::deleting_func_tail(&func, &range()),
        capture::func_tail_deleted(&func, 0x405000),
        capture::tail_owner_changed(&tail, 0x401000, 0x406000),
        capture::func_noret_changed(&func),
        capture::updating_tryblks(tbv.clone()),
        capture::tryblks_updated(tbv),
        capture::deleting_tryblks(&range()),
        capture::stkpnts_changed(&func),
        capture::frame_created(0x401000),
        capture::frame_expanded(0x401000, 0xff00_0000_0000_0101, 8),
        capture::frame_deleted(&func),
        capture::frame_udm_created(0x401000, &udm),
        capture::frame_udm_deleted(0x401000, 0xff00_0000_0000_0101, &udm),
        capture::frame_udm_renamed(0x401000, &udm_new, "field_0"),
        capture::frame_udm_changed(0x401000, 0xff00_0000_0000_0101, &udm, &udm_new),
        capture::make_code(&insn),
        capture::make_data(0x404000, 0x400, 0, 4),
        capture::destroyed_items(0x404000, 0x404004, false),
        capture::byte_patched(0x402010, 0xb8),
        capture::item_color_changed(0x402010, OpaqueValue::Unsigned(0xff0000)),
        capture::callee_addr_changed(0x402020, 0x401000),
        capture::changing_op_type(0x402010, 1, OpaqueValue::Null),
        capture::op_type_changed(0x402010, 1),
        capture::changing_op_ti(0x402010, 1, ty.clone(), OpaqueValue::Null),
        capture::op_ti_changed(0x402010, 1, ty.clone(), OpaqueValue::Null),
        capture::changing_ti(0x401000, ty.clone(), OpaqueValue::Null),
        capture::ti_changed(0x401000, ty, OpaqueValue::Null),
        capture::renamed(0x401000, "main", false, "sub_401000"),
        capture::changing_cmt(0x402010, false, "load one"),
        capture::cmt_changed(0x402010, false),
        capture::changing_range_cmt(OpaqueValue::Signed(0), &range(), "prologue", true),
        capture::range_cmt_changed(OpaqueValue::Signed(0), &range(), "prologue", true),
        capture::extra_cmt_changed(0x401000, 1000, "; entry"),
        capture::sgr_changed(
            0x401000,
            0x402000,
            29,
            OpaqueValue::Unsigned(1),
            OpaqueValue::Unsigned(0),
            1,
        ),
        capture::sgr_deleted(0x401000, 0x402000, 29),
        capture::bookmark_changed(0, &FakeLocation(Some(0x401000)), Some("entry"), 0),
        capture::idasgn_matched_ea(0x403000, "_memcpy", "vc64rtf"),
        capture::extlang_changed(2, OpaqueValue::Text("Python".to_string()), 0),
        capture::determined_main(0x401000),
        capture::dirtree_mkdir("/funcs/crt"),
        capture::dirtree_rmdir("/funcs/crt"),
        capture::dirtree_link("/funcs/main", true),
        capture::dirtree_move("/funcs/main", "/funcs/app/main"),
        capture::dirtree_rank("/funcs/app/main", 2),
        capture::dirtree_rminode(42),
        capture::dirtree_segm_moved(),
        capture::local_types_changed(OpaqueValue::Signed(1), 7, Some("point_t")),
        capture::lt_udm_created("point_t", &udm),
        capture::lt_udm_deleted("point_t", 0xff00_0000_0000_0101, &udm),
        capture::lt_udm_renamed("point_t", &udm_new, "field_0"),
        capture::lt_udm_changed("point_t", 0xff00_0000_0000_0101, &udm, &udm_new),
        capture::lt_udt_expanded("point_t", 0xff00_0000_0000_0101, 32),
        capture::lt_edm_created("color_t", &edm),
        capture::lt_edm_deleted("color_t", 0xff00_0000_0000_0201, &edm),
        capture::lt_edm_renamed("color_t", &edm_new, "RED"),
        capture::lt_edm_changed("color_t", 0xff00_0000_0000_0201, &edm, &edm_new),
    ];

    results
        .into_iter()
        .map(|r| r.expect("every sample capture should succeed"))
        .collect()
}

#[test]
fn every_kind_has_an_entry_point() {
    let events = one_of_each();
    let captured: Vec<EventKind> = events.iter().map(OplogEvent::kind).collect();
    assert_eq!(captured, EventKind::ALL.to_vec());
}

#[test]
fn every_kind_round_trips_through_json() {
    for event in one_of_each() {
        let json = event.to_json().expect("should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event_name"], event.kind().as_str());

        let restored = OplogEvent::from_json(&json).expect("should deserialize");
        assert_eq!(restored, event, "round trip of {}", event.kind());
    }
}

#[test]
fn timestamps_are_assigned_at_capture() {
    let before = chrono::Utc::now();
    let event = capture::frame_created(0x401000).expect("capture should succeed");
    let after = chrono::Utc::now();

    assert!(before <= event.timestamp() && event.timestamp() <= after);
    let restored = OplogEvent::from_json(&event.to_json().expect("serialize")).expect("parse");
    assert_eq!(restored.timestamp(), event.timestamp());
}

// ── scenarios ────────────────────────────────────────────────────────

#[test]
fn func_deleted_carries_only_the_address() {
    let event = capture::func_deleted(0x401000).expect("capture should succeed");
    assert_eq!(event.kind().as_str(), "func_deleted");
    assert_eq!(
        event.payload(),
        &EventPayload::FuncDeleted { func_ea: 0x401000 }
    );

    let json = serde_json::to_value(&event).expect("should serialize");
    let keys: BTreeSet<&str> = json
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, BTreeSet::from(["event_name", "func_ea", "timestamp"]));
    assert_eq!(json["func_ea"], 0x401000);
}

#[test]
fn make_code_fills_unused_operand_slots() {
    let event = capture::make_code(&FakeInstruction::mov_imm(0x402010))
        .expect("capture should succeed");

    let EventPayload::MakeCode { insn } = event.payload() else {
        panic!("expected make_code, got {}", event.kind());
    };
    assert_eq!(insn.ea(), 0x402010);
    assert_eq!(insn.ops().len(), 8);
    assert_eq!(insn.used_ops().count(), 2);
    for (slot, op) in insn.ops().iter().enumerate().skip(2) {
        assert!(op.is_void());
        assert_eq!(usize::from(op.n), slot);
    }
}

#[test]
fn renamed_keeps_both_names() {
    let event =
        capture::renamed(0x401000, "main", false, "sub_401000").expect("capture should succeed");
    match event.payload() {
        EventPayload::Renamed {
            ea,
            new_name,
            local_name,
            old_name,
        } => {
            assert_eq!(*ea, 0x401000);
            assert_eq!(new_name, "main");
            assert_eq!(old_name, "sub_401000");
            assert!(!local_name);
        }
        other => panic!("expected renamed, got {}", other.kind()),
    }
}

#[test]
fn segment_with_bad_bitness_is_not_captured() {
    let mut seg = FakeSegment::text();
    seg.bitness = 3;

    let err = capture::segm_added(&seg).expect_err("bitness 3 should fail");
    assert_eq!(err, CaptureError::Snapshot(SnapshotError::InvalidBitness(3)));
}

#[test]
fn segment_json_with_bad_field_is_rejected_on_load() {
    let event = capture::segm_added(&FakeSegment::text()).expect("capture should succeed");
    let mut json = serde_json::to_value(&event).expect("should serialize");
    json["segment"]["align"] = serde_json::json!(300);

    let err = serde_json::from_value::<OplogEvent>(json).expect_err("align 300 should fail");
    assert!(err.to_string().contains("align"), "error was: {err}");
}

#[test]
fn bookmark_without_address_fails() {
    let err = capture::bookmark_changed(3, &FakeLocation(None), Some("lost"), 0)
        .expect_err("unmappable place should fail");
    assert!(matches!(err, CaptureError::HostRead(ref e) if e.field == "ea"));
}

#[test]
fn deleted_bookmark_has_null_description() {
    let event = capture::bookmark_changed(3, &FakeLocation(Some(0x401000)), None, 1)
        .expect("capture should succeed");
    let json = serde_json::to_value(&event).expect("should serialize");
    assert!(json["desc"].is_null());
    assert_eq!(json["ea"], 0x401000);
}

#[test]
fn unknown_local_type_keeps_null_name() {
    let event = capture::local_types_changed(OpaqueValue::Signed(0), 0, None)
        .expect("capture should succeed");
    let json = serde_json::to_value(&event).expect("should serialize");
    assert_eq!(json["ordinal"], 0);
    assert!(json["name"].is_null());
}

#[test]
fn unresolvable_member_type_fails_capture() {
    let mut udm = FakeUdm::sample("field_0", 0);
    udm.tid = None;

    let err = capture::lt_udm_created("point_t", &udm).expect_err("tid failure should surface");
    assert!(matches!(
        err,
        CaptureError::Snapshot(SnapshotError::HostRead { .. })
    ));
}

#[test]
fn opaque_values_pass_through_unchanged() {
    let info = OpaqueValue::List(vec![
        OpaqueValue::Unsigned(0x400000),
        OpaqueValue::Unsigned(0x10000000),
    ]);
    let event = capture::allsegs_moved(info.clone()).expect("capture should succeed");
    let restored = OplogEvent::from_json(&event.to_json().expect("serialize")).expect("parse");
    assert_eq!(
        restored.into_payload(),
        EventPayload::AllsegsMoved { info }
    );
}

#[test]
fn extlang_kind_stays_raw() {
    let event = capture::extlang_changed(1, OpaqueValue::Null, 0).expect("capture should succeed");
    let EventPayload::ExtlangChanged { kind, .. } = event.payload() else {
        panic!("expected extlang_changed");
    };
    assert_eq!(ExtlangChange::from_code(*kind), Some(ExtlangChange::Removed));
}

// ── recorder flow ────────────────────────────────────────────────────

#[test]
fn recorder_journals_a_session() {
    let mut rec = Recorder::new(EventJournal::with_capacity(16), &CaptureConfig::default());
    let mut bad_seg = FakeSegment::text();
    bad_seg.defsr.pop();

    rec.record(capture::func_added(&FakeFunction::sample(0x401000, "sub_401000")))
        .expect("func_added");
    assert!(rec.record(capture::segm_added(&bad_seg)).is_err());
    rec.record(capture::renamed(0x401000, "main", false, "sub_401000"))
        .expect("renamed");
    rec.unmapped("auto_empty").expect("auto_empty is ignored");
    assert!(rec.unmapped("brand_new_notification").is_err());

    let stats = rec.stats();
    assert_eq!(stats.accepted, 2);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.ignored, 1);

    let journal = rec.into_sink();
    let kinds: Vec<EventKind> = journal.entries().iter().map(|e| e.event.kind()).collect();
    assert_eq!(kinds, vec![EventKind::FuncAdded, EventKind::Renamed]);
    assert_eq!(journal.since(1)[0].seq, 2);

    let replayed = EventJournal::from_json_lines(&journal.to_json_lines().expect("export"))
        .expect("import");
    assert_eq!(replayed.entries(), journal.entries());
}
