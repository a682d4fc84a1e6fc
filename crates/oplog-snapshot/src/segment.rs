//! Segment snapshots.
//!
//! A segment carries several host attributes that are stored in narrow
//! integers (alignment, combination, permissions, bitness, type, flags) and
//! a fixed table of 16 default segment register values. [`SegmentFields`] is
//! the raw, unchecked record; [`SegmentSnapshot`] can only be obtained by
//! validating one, whether it comes from a live host segment or from a
//! persisted JSON document.

use oplog_types::Ea;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::host::HostSegment;
use crate::validation::{check_bitness, check_len, check_u16, check_u8, DEFSR_SLOTS};

/// Unvalidated segment attributes as read from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentFields {
    pub start_ea: Ea,
    pub end_ea: Ea,
    /// Internal id of the segment name.
    pub name: u64,
    /// Internal id of the segment class.
    pub sclass: u64,
    pub orgbase: u64,
    pub align: i64,
    pub comb: i64,
    pub perm: i64,
    pub bitness: i64,
    pub flags: i64,
    pub sel: u64,
    pub defsr: Vec<u64>,
    #[serde(rename = "type")]
    pub seg_type: i64,
    pub color: u32,
    pub segment_name: Option<String>,
    pub segment_class: Option<String>,
}

impl SegmentFields {
    /// Reads every attribute of `seg` without checking it.
    pub fn read<S: HostSegment + ?Sized>(seg: &S) -> Self {
        Self {
            start_ea: seg.start_ea(),
            end_ea: seg.end_ea(),
            name: seg.name_id(),
            sclass: seg.class_id(),
            orgbase: seg.orgbase(),
            align: seg.align(),
            comb: seg.comb(),
            perm: seg.perm(),
            bitness: seg.bitness(),
            flags: seg.flags(),
            sel: seg.sel(),
            defsr: seg.defsr().to_vec(),
            seg_type: seg.seg_type(),
            color: seg.color(),
            segment_name: seg.segment_name(),
            segment_class: seg.segment_class(),
        }
    }
}

/// An immutable, validated copy of a host segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SegmentFields")]
pub struct SegmentSnapshot {
    start_ea: Ea,
    end_ea: Ea,
    name: u64,
    sclass: u64,
    orgbase: u64,
    align: u8,
    comb: u8,
    perm: u8,
    bitness: u8,
    flags: u16,
    sel: u64,
    defsr: [u64; DEFSR_SLOTS],
    #[serde(rename = "type")]
    seg_type: u8,
    color: u32,
    segment_name: Option<String>,
    segment_class: Option<String>,
}

impl SegmentSnapshot {
    /// Copies and validates a live host segment.
    pub fn from_host<S: HostSegment + ?Sized>(seg: &S) -> Result<Self, SnapshotError> {
        let fields = SegmentFields::read(seg);
        let snapshot = Self::try_from(fields);
        if let Err(err) = &snapshot {
            tracing::debug!(
                start_ea = seg.start_ea(),
                field = err.field(),
                error = %err,
                "segment rejected by validation"
            );
        }
        snapshot
    }

    pub fn start_ea(&self) -> Ea {
        self.start_ea
    }

    pub fn end_ea(&self) -> Ea {
        self.end_ea
    }

    /// Internal id of the segment name.
    pub fn name(&self) -> u64 {
        self.name
    }

    /// Internal id of the segment class.
    pub fn sclass(&self) -> u64 {
        self.sclass
    }

    pub fn orgbase(&self) -> u64 {
        self.orgbase
    }

    pub fn align(&self) -> u8 {
        self.align
    }

    pub fn comb(&self) -> u8 {
        self.comb
    }

    pub fn perm(&self) -> u8 {
        self.perm
    }

    /// Addressing width code: 0 = 16-bit, 1 = 32-bit, 2 = 64-bit.
    pub fn bitness(&self) -> u8 {
        self.bitness
    }

    /// Addressing width in bits (16, 32 or 64).
    pub fn address_bits(&self) -> u32 {
        16 << self.bitness
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn sel(&self) -> u64 {
        self.sel
    }

    pub fn defsr(&self) -> &[u64; DEFSR_SLOTS] {
        &self.defsr
    }

    pub fn seg_type(&self) -> u8 {
        self.seg_type
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn segment_name(&self) -> Option<&str> {
        self.segment_name.as_deref()
    }

    pub fn segment_class(&self) -> Option<&str> {
        self.segment_class.as_deref()
    }

    /// Size of the segment in bytes.
    pub fn size(&self) -> u64 {
        self.end_ea.saturating_sub(self.start_ea)
    }
}

impl TryFrom<SegmentFields> for SegmentSnapshot {
    type Error = SnapshotError;

    fn try_from(fields: SegmentFields) -> Result<Self, Self::Error> {
        let bitness = check_bitness(fields.bitness)?;
        let align = check_u8("align", fields.align)?;
        let comb = check_u8("comb", fields.comb)?;
        let perm = check_u8("perm", fields.perm)?;
        let seg_type = check_u8("type", fields.seg_type)?;
        let flags = check_u16("flags", fields.flags)?;
        check_len("defsr", &fields.defsr, DEFSR_SLOTS)?;

        let mut defsr = [0u64; DEFSR_SLOTS];
        defsr.copy_from_slice(&fields.defsr);

        Ok(Self {
            start_ea: fields.start_ea,
            end_ea: fields.end_ea,
            name: fields.name,
            sclass: fields.sclass,
            orgbase: fields.orgbase,
            align,
            comb,
            perm,
            bitness,
            flags,
            sel: fields.sel,
            defsr,
            seg_type,
            color: fields.color,
            segment_name: fields.segment_name,
            segment_class: fields.segment_class,
        })
    }
}

impl From<SegmentSnapshot> for SegmentFields {
    fn from(s: SegmentSnapshot) -> Self {
        Self {
            start_ea: s.start_ea,
            end_ea: s.end_ea,
            name: s.name,
            sclass: s.sclass,
            orgbase: s.orgbase,
            align: s.align.into(),
            comb: s.comb.into(),
            perm: s.perm.into(),
            bitness: s.bitness.into(),
            flags: s.flags.into(),
            sel: s.sel,
            defsr: s.defsr.to_vec(),
            seg_type: s.seg_type.into(),
            color: s.color,
            segment_name: s.segment_name,
            segment_class: s.segment_class,
        }
    }
}
