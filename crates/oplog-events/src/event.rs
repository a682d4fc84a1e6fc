//! Event domain, kind, payload and envelope types for the operation log.
//!
//! The kinds, their string tags, their domains and their payload fields are
//! declared once in the `event_taxonomy!` invocation below. Everything that
//! maps between those views ([`EventKind::ALL`], [`EventKind::as_str`],
//! [`EventKind::domain`], `FromStr`, [`EventPayload::kind`]) is generated
//! from that single table.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use oplog_snapshot::{
    EnumMemberSnapshot, FunctionSnapshot, InstructionSnapshot, RangeSnapshot, SegmentSnapshot,
    TypeMemberSnapshot,
};
use oplog_types::{Ea, OpaqueValue, Tid};
use serde::{Deserialize, Serialize};

/// Event domains.
///
/// Each domain groups the kinds that touch one area of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventDomain {
    /// Segment creation, deletion, bounds, names and attributes.
    #[serde(rename = "SEGMENT")]
    Segment,
    /// Functions, tails, try blocks, stack points and frames.
    #[serde(rename = "FUNCTION")]
    Function,
    /// Code/data items, patches, colors, operand and item types.
    #[serde(rename = "ITEM")]
    Item,
    /// Names, comments and segment register ranges.
    #[serde(rename = "ANNOTATION")]
    Annotation,
    /// Bookmarks, signature matches, languages and the entry point.
    #[serde(rename = "NAVIGATION")]
    Navigation,
    /// The user-visible directory tree.
    #[serde(rename = "DIRECTORY")]
    Directory,
    /// Local type library members.
    #[serde(rename = "LOCAL_TYPE")]
    LocalType,
}

impl EventDomain {
    pub const ALL: [EventDomain; 7] = [
        Self::Segment,
        Self::Function,
        Self::Item,
        Self::Annotation,
        Self::Navigation,
        Self::Directory,
        Self::LocalType,
    ];

    /// Returns the canonical string label for this domain.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Segment => "SEGMENT",
            Self::Function => "FUNCTION",
            Self::Item => "ITEM",
            Self::Annotation => "ANNOTATION",
            Self::Navigation => "NAVIGATION",
            Self::Directory => "DIRECTORY",
            Self::LocalType => "LOCAL_TYPE",
        }
    }

    /// Kinds belonging to this domain, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL
            .iter()
            .copied()
            .filter(move |kind| kind.domain() == self)
    }
}

impl std::fmt::Display for EventDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventDomain {
    type Err = ParseEventDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEGMENT" => Ok(Self::Segment),
            "FUNCTION" => Ok(Self::Function),
            "ITEM" => Ok(Self::Item),
            "ANNOTATION" => Ok(Self::Annotation),
            "NAVIGATION" => Ok(Self::Navigation),
            "DIRECTORY" => Ok(Self::Directory),
            "LOCAL_TYPE" => Ok(Self::LocalType),
            _ => Err(ParseEventDomainError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown event domain string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event domain: {0}")]
pub struct ParseEventDomainError(pub String);

/// Error returned when parsing an unknown event kind tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct ParseEventKindError(pub String);

macro_rules! event_taxonomy {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $tag:literal in $domain:ident {
                $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
            }
        )*
    ) => {
        /// Kind-specific event payloads.
        ///
        /// Serialized internally tagged: the kind's tag sits under
        /// `event_name` next to the payload fields.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "event_name")]
        pub enum EventPayload {
            $(
                $(#[$meta])*
                #[serde(rename = $tag)]
                $variant { $( $(#[$fmeta])* $field: $ty ),* },
            )*
        }

        /// The closed set of event kinds, without payloads.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum EventKind {
            $(
                #[serde(rename = $tag)]
                $variant,
            )*
        }

        impl EventKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant),*];

            /// Returns the stable tag for this kind.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)*
                }
            }

            /// Returns the domain this kind belongs to.
            pub fn domain(self) -> EventDomain {
                match self {
                    $(Self::$variant => EventDomain::$domain,)*
                }
            }
        }

        impl FromStr for EventKind {
            type Err = ParseEventKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)*
                    _ => Err(ParseEventKindError(s.to_string())),
                }
            }
        }

        impl EventPayload {
            /// Returns the kind of this payload.
            pub fn kind(&self) -> EventKind {
                match self {
                    $(Self::$variant { .. } => EventKind::$variant,)*
                }
            }
        }
    };
}

event_taxonomy! {
    // ── Segment domain ───────────────────────────────────────────────
    /// A segment is about to be created.
    AddingSegm = "adding_segm" in Segment {
        /// The segment being added.
        segment: SegmentSnapshot,
    }
    /// A segment was created.
    SegmAdded = "segm_added" in Segment {
        /// The new segment.
        segment: SegmentSnapshot,
    }
    /// A segment is about to be deleted.
    DeletingSegm = "deleting_segm" in Segment {
        /// Start address of the segment.
        start_ea: Ea,
    }
    /// A segment was deleted.
    SegmDeleted = "segm_deleted" in Segment {
        /// Start address of the deleted segment.
        start_ea: Ea,
        /// End address of the deleted segment.
        end_ea: Ea,
        /// Segment modification flags passed to the deletion.
        flags: u32,
    }
    /// A segment's start address is about to change.
    ChangingSegmStart = "changing_segm_start" in Segment {
        /// The segment before the change.
        segment: SegmentSnapshot,
        /// The requested start address.
        new_start: Ea,
        /// Segment modification flags.
        segmod_flags: i32,
    }
    /// A segment's start address changed.
    SegmStartChanged = "segm_start_changed" in Segment {
        /// The segment after the change.
        segment: SegmentSnapshot,
        /// The previous start address.
        old_start: Ea,
    }
    /// A segment's end address is about to change.
    ChangingSegmEnd = "changing_segm_end" in Segment {
        /// The segment before the change.
        segment: SegmentSnapshot,
        /// The requested end address.
        new_end: Ea,
        /// Segment modification flags.
        segmod_flags: i32,
    }
    /// A segment's end address changed.
    SegmEndChanged = "segm_end_changed" in Segment {
        /// The segment after the change.
        segment: SegmentSnapshot,
        /// The previous end address.
        old_end: Ea,
    }
    /// A segment is about to be renamed.
    ChangingSegmName = "changing_segm_name" in Segment {
        /// The segment before the rename.
        segment: SegmentSnapshot,
        /// The current segment name.
        old_name: String,
    }
    /// A segment was renamed.
    SegmNameChanged = "segm_name_changed" in Segment {
        /// The segment after the rename.
        segment: SegmentSnapshot,
        /// The new segment name.
        name: String,
    }
    /// A segment's class is about to change.
    ChangingSegmClass = "changing_segm_class" in Segment {
        /// The segment before the change.
        segment: SegmentSnapshot,
    }
    /// A segment's class changed.
    SegmClassChanged = "segm_class_changed" in Segment {
        /// The segment after the change.
        segment: SegmentSnapshot,
        /// The new class name (e.g. `CODE`).
        class: String,
    }
    /// Segment attributes other than bounds, name and class changed.
    SegmAttrsUpdated = "segm_attrs_updated" in Segment {
        /// The segment after the update.
        segment: SegmentSnapshot,
    }
    /// A segment was moved.
    SegmMoved = "segm_moved" in Segment {
        /// The old start address.
        from: Ea,
        /// The new start address.
        to: Ea,
        /// Number of bytes moved.
        size: u64,
        /// Whether the address mapping of the debugger changed.
        changed_netmap: bool,
    }
    /// The whole program was rebased.
    AllsegsMoved = "allsegs_moved" in Segment {
        /// The host's move table, carried unmodified.
        info: OpaqueValue,
    }

    // ── Function domain ──────────────────────────────────────────────
    /// A function was created.
    FuncAdded = "func_added" in Function {
        /// The new function.
        func: FunctionSnapshot,
    }
    /// Function attributes changed.
    FuncUpdated = "func_updated" in Function {
        /// The function after the update.
        func: FunctionSnapshot,
    }
    /// A function's start address is about to change.
    SetFuncStart = "set_func_start" in Function {
        /// The function before the change.
        func: FunctionSnapshot,
        /// The requested start address.
        new_start: Ea,
    }
    /// A function's end address is about to change.
    SetFuncEnd = "set_func_end" in Function {
        /// The function before the change.
        func: FunctionSnapshot,
        /// The requested end address.
        new_end: Ea,
    }
    /// A function is about to be deleted.
    DeletingFunc = "deleting_func" in Function {
        /// The function being deleted.
        func: FunctionSnapshot,
    }
    /// A function was deleted. Only its start address survives.
    FuncDeleted = "func_deleted" in Function {
        /// Start address of the deleted function.
        func_ea: Ea,
    }
    /// A function became a thunk.
    ThunkFuncCreated = "thunk_func_created" in Function {
        /// The thunk function.
        func: FunctionSnapshot,
    }
    /// A tail chunk was attached to a function.
    FuncTailAppended = "func_tail_appended" in Function {
        /// The owning function.
        func: FunctionSnapshot,
        /// The appended tail.
        tail: FunctionSnapshot,
    }
    /// A tail chunk is about to be removed from a function.
    DeletingFuncTail = "deleting_func_tail" in Function {
        /// The owning function.
        func: FunctionSnapshot,
        /// Address range of the tail.
        tail: RangeSnapshot,
    }
    /// A tail chunk was removed from a function.
    FuncTailDeleted = "func_tail_deleted" in Function {
        /// The former owner.
        func: FunctionSnapshot,
        /// Start address of the removed tail.
        tail_ea: Ea,
    }
    /// A tail chunk changed owner.
    TailOwnerChanged = "tail_owner_changed" in Function {
        /// The tail after the change.
        tail: FunctionSnapshot,
        /// Start address of the new owner.
        owner_func: Ea,
        /// Start address of the previous owner.
        old_owner: Ea,
    }
    /// A function's no-return flag changed.
    FuncNoretChanged = "func_noret_changed" in Function {
        /// The function after the change.
        func: FunctionSnapshot,
    }
    /// Try blocks are about to be updated.
    UpdatingTryblks = "updating_tryblks" in Function {
        /// The host's try block vector, carried unmodified.
        tbv: OpaqueValue,
    }
    /// Try blocks were updated.
    TryblksUpdated = "tryblks_updated" in Function {
        /// The host's try block vector, carried unmodified.
        tbv: OpaqueValue,
    }
    /// Try blocks in a range are about to be deleted.
    DeletingTryblks = "deleting_tryblks" in Function {
        /// The affected address range.
        range: RangeSnapshot,
    }
    /// Stack change points of a function were modified.
    StkpntsChanged = "stkpnts_changed" in Function {
        /// The function after the change.
        func: FunctionSnapshot,
    }
    /// A stack frame was created for a function.
    FrameCreated = "frame_created" in Function {
        /// Start address of the function.
        func_ea: Ea,
    }
    /// A stack frame was grown at a member.
    FrameExpanded = "frame_expanded" in Function {
        /// Start address of the function.
        func_ea: Ea,
        /// Type id of the member the gap was inserted before.
        udm_tid: Tid,
        /// Number of bytes inserted.
        delta: i64,
    }
    /// A stack frame was deleted.
    FrameDeleted = "frame_deleted" in Function {
        /// The function that owned the frame.
        func: FunctionSnapshot,
    }
    /// A frame variable was created.
    FrameUdmCreated = "frame_udm_created" in Function {
        /// Start address of the function.
        func_ea: Ea,
        /// The new frame member.
        udm: TypeMemberSnapshot,
    }
    /// A frame variable was deleted.
    FrameUdmDeleted = "frame_udm_deleted" in Function {
        /// Start address of the function.
        func_ea: Ea,
        /// Type id of the deleted member.
        udm_tid: Tid,
        /// The deleted frame member.
        udm: TypeMemberSnapshot,
    }
    /// A frame variable was renamed.
    FrameUdmRenamed = "frame_udm_renamed" in Function {
        /// Start address of the function.
        func_ea: Ea,
        /// The member after the rename.
        udm: TypeMemberSnapshot,
        /// The previous member name.
        old_name: String,
    }
    /// A frame variable changed type or attributes.
    FrameUdmChanged = "frame_udm_changed" in Function {
        /// Start address of the function.
        func_ea: Ea,
        /// Type id of the member.
        udm_tid: Tid,
        /// The member before the change.
        old_udm: TypeMemberSnapshot,
        /// The member after the change.
        new_udm: TypeMemberSnapshot,
    }

    // ── Item domain ──────────────────────────────────────────────────
    /// An instruction was created.
    MakeCode = "make_code" in Item {
        /// The decoded instruction with all eight operand slots.
        insn: InstructionSnapshot,
    }
    /// A data item was created.
    MakeData = "make_data" in Item {
        /// Address of the item.
        ea: Ea,
        /// Data type flags.
        flags: u64,
        /// Type id for structure data, `0` otherwise.
        tid: Tid,
        /// Item length in bytes.
        len: u64,
    }
    /// Items in a range were destroyed.
    DestroyedItems = "destroyed_items" in Item {
        /// Start of the range.
        ea1: Ea,
        /// End of the range (exclusive).
        ea2: Ea,
        /// Whether the range is about to be disabled.
        will_disable_range: bool,
    }
    /// A byte was patched.
    BytePatched = "byte_patched" in Item {
        /// Address of the byte.
        ea: Ea,
        /// The original value.
        old_value: u32,
    }
    /// An item's color changed.
    ItemColorChanged = "item_color_changed" in Item {
        /// Address of the item.
        ea: Ea,
        /// The new color, carried unmodified.
        color: OpaqueValue,
    }
    /// The callee of a call instruction was set.
    CalleeAddrChanged = "callee_addr_changed" in Item {
        /// Address of the call instruction.
        ea: Ea,
        /// Address of the callee.
        callee: Ea,
    }
    /// An operand's representation is about to change.
    ChangingOpType = "changing_op_type" in Item {
        /// Address of the instruction.
        ea: Ea,
        /// Operand number.
        n: i32,
        /// The host's operand info, carried unmodified.
        opinfo: OpaqueValue,
    }
    /// An operand's representation changed.
    OpTypeChanged = "op_type_changed" in Item {
        /// Address of the instruction.
        ea: Ea,
        /// Operand number.
        n: i32,
    }
    /// An operand's type is about to change.
    ChangingOpTi = "changing_op_ti" in Item {
        /// Address of the instruction.
        ea: Ea,
        /// Operand number.
        n: i32,
        /// Serialized new type.
        new_type: OpaqueValue,
        /// Serialized new field names.
        new_fnames: OpaqueValue,
    }
    /// An operand's type changed.
    OpTiChanged = "op_ti_changed" in Item {
        /// Address of the instruction.
        ea: Ea,
        /// Operand number.
        n: i32,
        /// Serialized type.
        r#type: OpaqueValue,
        /// Serialized field names.
        fnames: OpaqueValue,
    }
    /// An item's type is about to change.
    ChangingTi = "changing_ti" in Item {
        /// Address of the item.
        ea: Ea,
        /// Serialized new type.
        new_type: OpaqueValue,
        /// Serialized new field names.
        new_fnames: OpaqueValue,
    }
    /// An item's type changed.
    TiChanged = "ti_changed" in Item {
        /// Address of the item.
        ea: Ea,
        /// Serialized type.
        r#type: OpaqueValue,
        /// Serialized field names.
        fnames: OpaqueValue,
    }

    // ── Annotation domain ────────────────────────────────────────────
    /// A name changed. The old and new names are both kept.
    Renamed = "renamed" in Annotation {
        /// Address of the named item.
        ea: Ea,
        /// The new name.
        new_name: String,
        /// Whether the name is local to its function.
        local_name: bool,
        /// The previous name.
        old_name: String,
    }
    /// An item comment is about to change.
    ChangingCmt = "changing_cmt" in Annotation {
        /// Address of the item.
        ea: Ea,
        /// Whether the comment is repeatable.
        repeatable_cmt: bool,
        /// The new comment text.
        new_cmt: String,
    }
    /// An item comment changed.
    CmtChanged = "cmt_changed" in Annotation {
        /// Address of the item.
        ea: Ea,
        /// Whether the comment is repeatable.
        repeatable_cmt: bool,
    }
    /// A range comment is about to change.
    ChangingRangeCmt = "changing_range_cmt" in Annotation {
        /// The range kind (function or segment), carried unmodified.
        kind: OpaqueValue,
        /// The commented range.
        range: RangeSnapshot,
        /// The new comment text.
        cmt: String,
        /// Whether the comment is repeatable.
        repeatable: bool,
    }
    /// A range comment changed.
    RangeCmtChanged = "range_cmt_changed" in Annotation {
        /// The range kind (function or segment), carried unmodified.
        kind: OpaqueValue,
        /// The commented range.
        range: RangeSnapshot,
        /// The comment text.
        cmt: String,
        /// Whether the comment is repeatable.
        repeatable: bool,
    }
    /// An anterior or posterior comment line changed.
    ExtraCmtChanged = "extra_cmt_changed" in Annotation {
        /// Address of the item.
        ea: Ea,
        /// Host line index of the extra comment.
        line_idx: i32,
        /// The line text.
        cmt: String,
    }
    /// A segment register range changed.
    SgrChanged = "sgr_changed" in Annotation {
        /// Start of the range.
        start_ea: Ea,
        /// End of the range.
        end_ea: Ea,
        /// Segment register number.
        regnum: i32,
        /// The new register value.
        value: OpaqueValue,
        /// The previous register value.
        old_value: OpaqueValue,
        /// How the value was set (user, auto, ...).
        tag: u8,
    }
    /// A segment register range was deleted.
    SgrDeleted = "sgr_deleted" in Annotation {
        /// Start of the range.
        start_ea: Ea,
        /// End of the range.
        end_ea: Ea,
        /// Segment register number.
        regnum: i32,
    }

    // ── Navigation domain ────────────────────────────────────────────
    /// A bookmark was added, changed or removed.
    BookmarkChanged = "bookmark_changed" in Navigation {
        /// Bookmark slot.
        index: u32,
        /// Address the bookmark points at.
        ea: Ea,
        /// Bookmark description, absent when the bookmark was removed.
        desc: Option<String>,
        /// Host operation code.
        operation: i32,
    }
    /// A library signature matched a function.
    IdasgnMatchedEa = "idasgn_matched_ea" in Navigation {
        /// Address of the matched function.
        ea: Ea,
        /// The applied name.
        name: String,
        /// The signature library.
        lib_name: String,
    }
    /// An external language was installed, removed or made default.
    ExtlangChanged = "extlang_changed" in Navigation {
        /// Raw change code, see [`oplog_types::ExtlangChange`].
        kind: i32,
        /// The language handle, carried unmodified.
        el: OpaqueValue,
        /// Language index.
        idx: i32,
    }
    /// The program entry point was determined.
    DeterminedMain = "determined_main" in Navigation {
        /// Address of `main`.
        main: Ea,
    }

    // ── Directory domain ─────────────────────────────────────────────
    /// A directory was created.
    DirtreeMkdir = "dirtree_mkdir" in Directory {
        /// Path of the new directory.
        path: String,
    }
    /// A directory was removed.
    DirtreeRmdir = "dirtree_rmdir" in Directory {
        /// Path of the removed directory.
        path: String,
    }
    /// An entry was linked into or unlinked from a directory.
    DirtreeLink = "dirtree_link" in Directory {
        /// Path of the entry.
        path: String,
        /// `true` for link, `false` for unlink.
        link: bool,
    }
    /// An entry was moved.
    DirtreeMove = "dirtree_move" in Directory {
        /// The previous path.
        from: String,
        /// The new path.
        to: String,
    }
    /// An entry's position within its directory changed.
    DirtreeRank = "dirtree_rank" in Directory {
        /// Path of the entry.
        path: String,
        /// The new rank.
        rank: u64,
    }
    /// An inode was removed from the tree.
    DirtreeRminode = "dirtree_rminode" in Directory {
        /// The removed inode.
        inode: u64,
    }
    /// Directory entries were updated after a segment move.
    DirtreeSegmMoved = "dirtree_segm_moved" in Directory {}

    // ── Local type domain ────────────────────────────────────────────
    /// The local type library changed.
    LocalTypesChanged = "local_types_changed" in LocalType {
        /// The host's change code, carried unmodified.
        ltc: OpaqueValue,
        /// Ordinal of the changed type, `0` when unknown.
        ordinal: u32,
        /// Name of the changed type, absent when unknown.
        name: Option<String>,
    }
    /// A struct or union member was created.
    LtUdmCreated = "lt_udm_created" in LocalType {
        /// Name of the enclosing type.
        udt_name: String,
        /// The new member.
        udm: TypeMemberSnapshot,
    }
    /// A struct or union member was deleted.
    LtUdmDeleted = "lt_udm_deleted" in LocalType {
        /// Name of the enclosing type.
        udt_name: String,
        /// Type id of the deleted member.
        udm_tid: Tid,
        /// The deleted member.
        udm: TypeMemberSnapshot,
    }
    /// A struct or union member was renamed.
    LtUdmRenamed = "lt_udm_renamed" in LocalType {
        /// Name of the enclosing type.
        udt_name: String,
        /// The member after the rename.
        udm: TypeMemberSnapshot,
        /// The previous member name.
        old_name: String,
    }
    /// A struct or union member changed type or attributes.
    LtUdmChanged = "lt_udm_changed" in LocalType {
        /// Name of the enclosing type.
        udt_name: String,
        /// Type id of the member.
        udm_tid: Tid,
        /// The member before the change.
        old_udm: TypeMemberSnapshot,
        /// The member after the change.
        new_udm: TypeMemberSnapshot,
    }
    /// A struct or union was grown at a member.
    LtUdtExpanded = "lt_udt_expanded" in LocalType {
        /// Name of the type.
        udt_name: String,
        /// Type id of the member the gap was inserted before.
        udm_tid: Tid,
        /// Number of bytes inserted.
        delta: i64,
    }
    /// An enum member was created.
    LtEdmCreated = "lt_edm_created" in LocalType {
        /// Name of the enum.
        enum_name: String,
        /// The new member.
        edm: EnumMemberSnapshot,
    }
    /// An enum member was deleted.
    LtEdmDeleted = "lt_edm_deleted" in LocalType {
        /// Name of the enum.
        enum_name: String,
        /// Type id of the deleted member.
        edm_tid: Tid,
        /// The deleted member.
        edm: EnumMemberSnapshot,
    }
    /// An enum member was renamed.
    LtEdmRenamed = "lt_edm_renamed" in LocalType {
        /// Name of the enum.
        enum_name: String,
        /// The member after the rename.
        edm: EnumMemberSnapshot,
        /// The previous member name.
        old_name: String,
    }
    /// An enum member changed value or comment.
    LtEdmChanged = "lt_edm_changed" in LocalType {
        /// Name of the enum.
        enum_name: String,
        /// Type id of the member.
        edm_tid: Tid,
        /// The member before the change.
        old_edm: EnumMemberSnapshot,
        /// The member after the change.
        new_edm: EnumMemberSnapshot,
    }
}

impl EventKind {
    /// Returns `true` for notifications sent before the host applies a change.
    pub fn is_pre_change(self) -> bool {
        let tag = self.as_str();
        tag.starts_with("adding_")
            || tag.starts_with("changing_")
            || tag.starts_with("deleting_")
            || tag.starts_with("updating_")
            || self == Self::SetFuncStart
            || self == Self::SetFuncEnd
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EventPayload {
    pub fn event_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn domain(&self) -> EventDomain {
        self.kind().domain()
    }
}

/// One captured host notification.
///
/// The timestamp is assigned once, when the event is built, and the event
/// is never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OplogEvent {
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    payload: EventPayload,
}

impl OplogEvent {
    /// Wraps `payload` with the current UTC time.
    pub fn now(payload: EventPayload) -> Self {
        Self {
            timestamp: Utc::now(),
            payload,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn domain(&self) -> EventDomain {
        self.payload.domain()
    }

    pub fn into_payload(self) -> EventPayload {
        self.payload
    }

    /// Serializes the event to its persisted JSON shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses an event from its persisted JSON shape.
    ///
    /// Snapshots embedded in the payload are validated again.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
