//! Capture entry points, one per event kind.
//!
//! The host hook layer calls the function named after the notification it
//! received, passing the callback's live references. Each entry point copies
//! what it needs into snapshots, stamps the event and returns it. Nothing
//! here keeps a host reference or writes to the host.
//!
//! Every entry point returns `Result`, including the ones that cannot fail
//! today, so that the hook layer handles all kinds the same way.

use oplog_snapshot::host::{
    HostEnumMember, HostFunction, HostInstruction, HostLocation, HostRange, HostSegment,
    HostTypeMember,
};
use oplog_snapshot::{
    EnumMemberSnapshot, FunctionSnapshot, InstructionSnapshot, RangeSnapshot, SegmentSnapshot,
    TypeMemberSnapshot,
};
use oplog_types::{Ea, OpaqueValue, Tid};

use crate::error::CaptureError;
use crate::event::{EventPayload, OplogEvent};

/// Result of a capture entry point.
pub type CaptureResult = Result<OplogEvent, CaptureError>;

fn emit(payload: EventPayload) -> CaptureResult {
    Ok(OplogEvent::now(payload))
}

fn seg(s: &dyn HostSegment) -> Result<SegmentSnapshot, CaptureError> {
    Ok(SegmentSnapshot::from_host(s)?)
}

fn udm(m: &dyn HostTypeMember) -> Result<TypeMemberSnapshot, CaptureError> {
    Ok(TypeMemberSnapshot::from_host(m)?)
}

fn edm(m: &dyn HostEnumMember) -> Result<EnumMemberSnapshot, CaptureError> {
    Ok(EnumMemberSnapshot::from_host(m)?)
}

// ── Segment domain ───────────────────────────────────────────────────

pub fn adding_segm(s: &dyn HostSegment) -> CaptureResult {
    emit(EventPayload::AddingSegm { segment: seg(s)? })
}

pub fn segm_added(s: &dyn HostSegment) -> CaptureResult {
    emit(EventPayload::SegmAdded { segment: seg(s)? })
}

pub fn deleting_segm(start_ea: Ea) -> CaptureResult {
    emit(EventPayload::DeletingSegm { start_ea })
}

pub fn segm_deleted(start_ea: Ea, end_ea: Ea, flags: u32) -> CaptureResult {
    emit(EventPayload::SegmDeleted {
        start_ea,
        end_ea,
        flags,
    })
}

pub fn changing_segm_start(s: &dyn HostSegment, new_start: Ea, segmod_flags: i32) -> CaptureResult {
    emit(EventPayload::ChangingSegmStart {
        segment: seg(s)?,
        new_start,
        segmod_flags,
    })
}

pub fn segm_start_changed(s: &dyn HostSegment, old_start: Ea) -> CaptureResult {
    emit(EventPayload::SegmStartChanged {
        segment: seg(s)?,
        old_start,
    })
}

pub fn changing_segm_end(s: &dyn HostSegment, new_end: Ea, segmod_flags: i32) -> CaptureResult {
    emit(EventPayload::ChangingSegmEnd {
        segment: seg(s)?,
        new_end,
        segmod_flags,
    })
}

pub fn segm_end_changed(s: &dyn HostSegment, old_end: Ea) -> CaptureResult {
    emit(EventPayload::SegmEndChanged {
        segment: seg(s)?,
        old_end,
    })
}

pub fn changing_segm_name(s: &dyn HostSegment, old_name: &str) -> CaptureResult {
    emit(EventPayload::ChangingSegmName {
        segment: seg(s)?,
        old_name: old_name.to_string(),
    })
}

pub fn segm_name_changed(s: &dyn HostSegment, name: &str) -> CaptureResult {
    emit(EventPayload::SegmNameChanged {
        segment: seg(s)?,
        name: name.to_string(),
    })
}

pub fn changing_segm_class(s: &dyn HostSegment) -> CaptureResult {
    emit(EventPayload::ChangingSegmClass { segment: seg(s)? })
}

pub fn segm_class_changed(s: &dyn HostSegment, class: &str) -> CaptureResult {
    emit(EventPayload::SegmClassChanged {
        segment: seg(s)?,
        class: class.to_string(),
    })
}

pub fn segm_attrs_updated(s: &dyn HostSegment) -> CaptureResult {
    emit(EventPayload::SegmAttrsUpdated { segment: seg(s)? })
}

pub fn segm_moved(from: Ea, to: Ea, size: u64, changed_netmap: bool) -> CaptureResult {
    emit(EventPayload::SegmMoved {
        from,
        to,
        size,
        changed_netmap,
    })
}

pub fn allsegs_moved(info: OpaqueValue) -> CaptureResult {
    emit(EventPayload::AllsegsMoved { info })
}

// ── Function domain ──────────────────────────────────────────────────

pub fn func_added(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::FuncAdded {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn func_updated(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::FuncUpdated {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn set_func_start(pfn: &dyn HostFunction, new_start: Ea) -> CaptureResult {
    emit(EventPayload::SetFuncStart {
        func: FunctionSnapshot::from_host(pfn),
        new_start,
    })
}

pub fn set_func_end(pfn: &dyn HostFunction, new_end: Ea) -> CaptureResult {
    emit(EventPayload::SetFuncEnd {
        func: FunctionSnapshot::from_host(pfn),
        new_end,
    })
}

pub fn deleting_func(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::DeletingFunc {
        func: FunctionSnapshot::from_host(pfn),
    })
}

/// The function is already gone; only its start address is recorded.
pub fn func_deleted(func_ea: Ea) -> CaptureResult {
    emit(EventPayload::FuncDeleted { func_ea })
}

pub fn thunk_func_created(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::ThunkFuncCreated {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn func_tail_appended(pfn: &dyn HostFunction, tail: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::FuncTailAppended {
        func: FunctionSnapshot::from_host(pfn),
        tail: FunctionSnapshot::from_host(tail),
    })
}

pub fn deleting_func_tail(pfn: &dyn HostFunction, tail: &dyn HostRange) -> CaptureResult {
    emit(EventPayload::DeletingFuncTail {
        func: FunctionSnapshot::from_host(pfn),
        tail: RangeSnapshot::from_host(tail),
    })
}

pub fn func_tail_deleted(pfn: &dyn HostFunction, tail_ea: Ea) -> CaptureResult {
    emit(EventPayload::FuncTailDeleted {
        func: FunctionSnapshot::from_host(pfn),
        tail_ea,
    })
}

pub fn tail_owner_changed(tail: &dyn HostFunction, owner_func: Ea, old_owner: Ea) -> CaptureResult {
    emit(EventPayload::TailOwnerChanged {
        tail: FunctionSnapshot::from_host(tail),
        owner_func,
        old_owner,
    })
}

pub fn func_noret_changed(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::FuncNoretChanged {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn updating_tryblks(tbv: OpaqueValue) -> CaptureResult {
    emit(EventPayload::UpdatingTryblks { tbv })
}

pub fn tryblks_updated(tbv: OpaqueValue) -> CaptureResult {
    emit(EventPayload::TryblksUpdated { tbv })
}

pub fn deleting_tryblks(range: &dyn HostRange) -> CaptureResult {
    emit(EventPayload::DeletingTryblks {
        range: RangeSnapshot::from_host(range),
    })
}

pub fn stkpnts_changed(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::StkpntsChanged {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn frame_created(func_ea: Ea) -> CaptureResult {
    emit(EventPayload::FrameCreated { func_ea })
}

pub fn frame_expanded(func_ea: Ea, udm_tid: Tid, delta: i64) -> CaptureResult {
    emit(EventPayload::FrameExpanded {
        func_ea,
        udm_tid,
        delta,
    })
}

pub fn frame_deleted(pfn: &dyn HostFunction) -> CaptureResult {
    emit(EventPayload::FrameDeleted {
        func: FunctionSnapshot::from_host(pfn),
    })
}

pub fn frame_udm_created(func_ea: Ea, member: &dyn HostTypeMember) -> CaptureResult {
    emit(EventPayload::FrameUdmCreated {
        func_ea,
        udm: udm(member)?,
    })
}

pub fn frame_udm_deleted(func_ea: Ea, udm_tid: Tid, member: &dyn HostTypeMember) -> CaptureResult {
    emit(EventPayload::FrameUdmDeleted {
        func_ea,
        udm_tid,
        udm: udm(member)?,
    })
}

pub fn frame_udm_renamed(func_ea: Ea, member: &dyn HostTypeMember, old_name: &str) -> CaptureResult {
    emit(EventPayload::FrameUdmRenamed {
        func_ea,
        udm: udm(member)?,
        old_name: old_name.to_string(),
    })
}

pub fn frame_udm_changed(
    func_ea: Ea,
    udm_tid: Tid,
    old_udm: &dyn HostTypeMember,
    new_udm: &dyn HostTypeMember,
) -> CaptureResult {
    emit(EventPayload::FrameUdmChanged {
        func_ea,
        udm_tid,
        old_udm: udm(old_udm)?,
        new_udm: udm(new_udm)?,
    })
}

// ── Item domain ──────────────────────────────────────────────────────

/// Records a new instruction with all eight operand slots.
pub fn make_code(insn: &dyn HostInstruction) -> CaptureResult {
    emit(EventPayload::MakeCode {
        insn: InstructionSnapshot::from_host(insn)?,
    })
}

pub fn make_data(ea: Ea, flags: u64, tid: Tid, len: u64) -> CaptureResult {
    emit(EventPayload::MakeData {
        ea,
        flags,
        tid,
        len,
    })
}

pub fn destroyed_items(ea1: Ea, ea2: Ea, will_disable_range: bool) -> CaptureResult {
    emit(EventPayload::DestroyedItems {
        ea1,
        ea2,
        will_disable_range,
    })
}

pub fn byte_patched(ea: Ea, old_value: u32) -> CaptureResult {
    emit(EventPayload::BytePatched { ea, old_value })
}

pub fn item_color_changed(ea: Ea, color: OpaqueValue) -> CaptureResult {
    emit(EventPayload::ItemColorChanged { ea, color })
}

pub fn callee_addr_changed(ea: Ea, callee: Ea) -> CaptureResult {
    emit(EventPayload::CalleeAddrChanged { ea, callee })
}

pub fn changing_op_type(ea: Ea, n: i32, opinfo: OpaqueValue) -> CaptureResult {
    emit(EventPayload::ChangingOpType { ea, n, opinfo })
}

pub fn op_type_changed(ea: Ea, n: i32) -> CaptureResult {
    emit(EventPayload::OpTypeChanged { ea, n })
}

pub fn changing_op_ti(ea: Ea, n: i32, new_type: OpaqueValue, new_fnames: OpaqueValue) -> CaptureResult {
    emit(EventPayload::ChangingOpTi {
        ea,
        n,
        new_type,
        new_fnames,
    })
}

pub fn op_ti_changed(ea: Ea, n: i32, r#type: OpaqueValue, fnames: OpaqueValue) -> CaptureResult {
    emit(EventPayload::OpTiChanged {
        ea,
        n,
        r#type,
        fnames,
    })
}

pub fn changing_ti(ea: Ea, new_type: OpaqueValue, new_fnames: OpaqueValue) -> CaptureResult {
    emit(EventPayload::ChangingTi {
        ea,
        new_type,
        new_fnames,
    })
}

pub fn ti_changed(ea: Ea, r#type: OpaqueValue, fnames: OpaqueValue) -> CaptureResult {
    emit(EventPayload::TiChanged { ea, r#type, fnames })
}

// ── Annotation domain ────────────────────────────────────────────────

pub fn renamed(ea: Ea, new_name: &str, local_name: bool, old_name: &str) -> CaptureResult {
    emit(EventPayload::Renamed {
        ea,
        new_name: new_name.to_string(),
        local_name,
        old_name: old_name.to_string(),
    })
}

pub fn changing_cmt(ea: Ea, repeatable_cmt: bool, new_cmt: &str) -> CaptureResult {
    emit(EventPayload::ChangingCmt {
        ea,
        repeatable_cmt,
        new_cmt: new_cmt.to_string(),
    })
}

pub fn cmt_changed(ea: Ea, repeatable_cmt: bool) -> CaptureResult {
    emit(EventPayload::CmtChanged { ea, repeatable_cmt })
}

pub fn changing_range_cmt(
    kind: OpaqueValue,
    range: &dyn HostRange,
    cmt: &str,
    repeatable: bool,
) -> CaptureResult {
    emit(EventPayload::ChangingRangeCmt {
        kind,
        range: RangeSnapshot::from_host(range),
        cmt: cmt.to_string(),
        repeatable,
    })
}

pub fn range_cmt_changed(
    kind: OpaqueValue,
    range: &dyn HostRange,
    cmt: &str,
    repeatable: bool,
) -> CaptureResult {
    emit(EventPayload::RangeCmtChanged {
        kind,
        range: RangeSnapshot::from_host(range),
        cmt: cmt.to_string(),
        repeatable,
    })
}

pub fn extra_cmt_changed(ea: Ea, line_idx: i32, cmt: &str) -> CaptureResult {
    emit(EventPayload::ExtraCmtChanged {
        ea,
        line_idx,
        cmt: cmt.to_string(),
    })
}

pub fn sgr_changed(
    start_ea: Ea,
    end_ea: Ea,
    regnum: i32,
    value: OpaqueValue,
    old_value: OpaqueValue,
    tag: u8,
) -> CaptureResult {
    emit(EventPayload::SgrChanged {
        start_ea,
        end_ea,
        regnum,
        value,
        old_value,
        tag,
    })
}

pub fn sgr_deleted(start_ea: Ea, end_ea: Ea, regnum: i32) -> CaptureResult {
    emit(EventPayload::SgrDeleted {
        start_ea,
        end_ea,
        regnum,
    })
}

// ── Navigation domain ────────────────────────────────────────────────

/// Records a bookmark change.
///
/// The bookmark's place is resolved to an address through the host, which
/// can fail for places that have none. `desc` is `None` when the bookmark
/// was removed.
pub fn bookmark_changed(
    index: u32,
    loc: &dyn HostLocation,
    desc: Option<&str>,
    operation: i32,
) -> CaptureResult {
    emit(EventPayload::BookmarkChanged {
        index,
        ea: loc.ea()?,
        desc: desc.map(str::to_string),
        operation,
    })
}

pub fn idasgn_matched_ea(ea: Ea, name: &str, lib_name: &str) -> CaptureResult {
    emit(EventPayload::IdasgnMatchedEa {
        ea,
        name: name.to_string(),
        lib_name: lib_name.to_string(),
    })
}

/// Records an external language change. `kind` is the raw host code; see
/// [`oplog_types::ExtlangChange`] for decoding it.
pub fn extlang_changed(kind: i32, el: OpaqueValue, idx: i32) -> CaptureResult {
    emit(EventPayload::ExtlangChanged { kind, el, idx })
}

pub fn determined_main(main: Ea) -> CaptureResult {
    emit(EventPayload::DeterminedMain { main })
}

// ── Directory domain ─────────────────────────────────────────────────

pub fn dirtree_mkdir(path: &str) -> CaptureResult {
    emit(EventPayload::DirtreeMkdir {
        path: path.to_string(),
    })
}

pub fn dirtree_rmdir(path: &str) -> CaptureResult {
    emit(EventPayload::DirtreeRmdir {
        path: path.to_string(),
    })
}

pub fn dirtree_link(path: &str, link: bool) -> CaptureResult {
    emit(EventPayload::DirtreeLink {
        path: path.to_string(),
        link,
    })
}

pub fn dirtree_move(from: &str, to: &str) -> CaptureResult {
    emit(EventPayload::DirtreeMove {
        from: from.to_string(),
        to: to.to_string(),
    })
}

pub fn dirtree_rank(path: &str, rank: u64) -> CaptureResult {
    emit(EventPayload::DirtreeRank {
        path: path.to_string(),
        rank,
    })
}

pub fn dirtree_rminode(inode: u64) -> CaptureResult {
    emit(EventPayload::DirtreeRminode { inode })
}

pub fn dirtree_segm_moved() -> CaptureResult {
    emit(EventPayload::DirtreeSegmMoved {})
}

// ── Local type domain ────────────────────────────────────────────────

/// `ordinal` 0 and `name: None` mean the host did not say which type changed.
pub fn local_types_changed(ltc: OpaqueValue, ordinal: u32, name: Option<&str>) -> CaptureResult {
    emit(EventPayload::LocalTypesChanged {
        ltc,
        ordinal,
        name: name.map(str::to_string),
    })
}

pub fn lt_udm_created(udt_name: &str, member: &dyn HostTypeMember) -> CaptureResult {
    emit(EventPayload::LtUdmCreated {
        udt_name: udt_name.to_string(),
        udm: udm(member)?,
    })
}

pub fn lt_udm_deleted(udt_name: &str, udm_tid: Tid, member: &dyn HostTypeMember) -> CaptureResult {
    emit(EventPayload::LtUdmDeleted {
        udt_name: udt_name.to_string(),
        udm_tid,
        udm: udm(member)?,
    })
}

pub fn lt_udm_renamed(udt_name: &str, member: &dyn HostTypeMember, old_name: &str) -> CaptureResult {
    emit(EventPayload::LtUdmRenamed {
        udt_name: udt_name.to_string(),
        udm: udm(member)?,
        old_name: old_name.to_string(),
    })
}

pub fn lt_udm_changed(
    udt_name: &str,
    udm_tid: Tid,
    old_udm: &dyn HostTypeMember,
    new_udm: &dyn HostTypeMember,
) -> CaptureResult {
    emit(EventPayload::LtUdmChanged {
        udt_name: udt_name.to_string(),
        udm_tid,
        old_udm: udm(old_udm)?,
        new_udm: udm(new_udm)?,
    })
}

pub fn lt_udt_expanded(udt_name: &str, udm_tid: Tid, delta: i64) -> CaptureResult {
    emit(EventPayload::LtUdtExpanded {
        udt_name: udt_name.to_string(),
        udm_tid,
        delta,
    })
}

pub fn lt_edm_created(enum_name: &str, member: &dyn HostEnumMember) -> CaptureResult {
    emit(EventPayload::LtEdmCreated {
        enum_name: enum_name.to_string(),
        edm: edm(member)?,
    })
}

pub fn lt_edm_deleted(enum_name: &str, edm_tid: Tid, member: &dyn HostEnumMember) -> CaptureResult {
    emit(EventPayload::LtEdmDeleted {
        enum_name: enum_name.to_string(),
        edm_tid,
        edm: edm(member)?,
    })
}

pub fn lt_edm_renamed(enum_name: &str, member: &dyn HostEnumMember, old_name: &str) -> CaptureResult {
    emit(EventPayload::LtEdmRenamed {
        enum_name: enum_name.to_string(),
        edm: edm(member)?,
        old_name: old_name.to_string(),
    })
}

pub fn lt_edm_changed(
    enum_name: &str,
    edm_tid: Tid,
    old_edm: &dyn HostEnumMember,
    new_edm: &dyn HostEnumMember,
) -> CaptureResult {
    emit(EventPayload::LtEdmChanged {
        enum_name: enum_name.to_string(),
        edm_tid,
        old_edm: edm(old_edm)?,
        new_edm: edm(new_edm)?,
    })
}
