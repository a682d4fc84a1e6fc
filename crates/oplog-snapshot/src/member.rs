//! Type member snapshots: struct/union members (`udm`) and enum members (`edm`).
//!
//! Both kinds resolve their type id through the host, which can fail when
//! the type handle no longer points at a live type. That failure is surfaced
//! as [`SnapshotError::HostRead`] rather than recorded as a sentinel.

use oplog_types::Tid;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::host::{HostEnumMember, HostTypeMember};

/// An immutable copy of a struct, union or frame member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMemberSnapshot {
    /// Offset in bits from the start of the enclosing type.
    pub offset: u64,
    /// Size in bits.
    pub size: u64,
    pub name: String,
    pub cmt: String,
    pub tid: Tid,
    pub repr: String,
    pub effalign: i32,
    pub tafld_bits: u32,
    pub fda: u8,
}

impl TypeMemberSnapshot {
    pub fn from_host<M: HostTypeMember + ?Sized>(udm: &M) -> Result<Self, SnapshotError> {
        let tid = udm.type_tid().map_err(|source| SnapshotError::HostRead {
            snapshot: "type member",
            source,
        })?;

        Ok(Self {
            offset: udm.offset(),
            size: udm.size(),
            name: udm.name().to_string(),
            cmt: udm.cmt().to_string(),
            tid,
            repr: udm.repr(),
            effalign: udm.effalign(),
            tafld_bits: udm.tafld_bits(),
            fda: udm.fda(),
        })
    }
}

/// An immutable copy of an enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberSnapshot {
    pub name: String,
    pub cmt: String,
    pub value: u64,
    pub tid: Tid,
}

impl EnumMemberSnapshot {
    pub fn from_host<M: HostEnumMember + ?Sized>(edm: &M) -> Result<Self, SnapshotError> {
        let tid = edm.tid().map_err(|source| SnapshotError::HostRead {
            snapshot: "enum member",
            source,
        })?;

        Ok(Self {
            name: edm.name().to_string(),
            cmt: edm.cmt().to_string(),
            value: edm.value(),
            tid,
        })
    }
}
