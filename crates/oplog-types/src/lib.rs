//! Shared primitives for the oplog crates.
//!
//! This crate holds the small vocabulary every other oplog crate speaks:
//! host address and type-id aliases, the carrier for host values whose
//! schema is not pinned down ([`OpaqueValue`]), and the error a host
//! accessor reports when it cannot produce a value ([`HostReadError`]).
//!
//! Nothing here touches host memory. The crate exists so that
//! `oplog-snapshot` and `oplog-events` agree on these shapes without
//! depending on each other for them.

use serde::{Deserialize, Serialize};

/// An effective address in the analysed program.
pub type Ea = u64;

/// A type identifier assigned by the host's type system.
pub type Tid = u64;

/// Sentinel the host uses for "no address" / "no type".
pub const BADADDR: Ea = Ea::MAX;

/// A host value carried through unmodified.
///
/// Several host notifications pass arguments whose structure is not part of
/// the event schema (try-block vectors, segment move tables, serialized type
/// strings, extlang handles). They are frozen into one of these variants at
/// capture time and never reinterpreted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OpaqueValue {
    /// The host passed nothing (a null pointer or `None`).
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An unsigned integer (addresses, selectors, colors).
    Unsigned(u64),
    /// A signed integer.
    Signed(i64),
    /// Text as rendered by the host.
    Text(String),
    /// Raw bytes, e.g. a serialized type string.
    Bytes(Vec<u8>),
    /// A sequence of values, e.g. a vector of try blocks.
    List(Vec<OpaqueValue>),
}

impl OpaqueValue {
    /// Returns `true` when the host passed nothing.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Default for OpaqueValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for OpaqueValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u64> for OpaqueValue {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<u32> for OpaqueValue {
    fn from(v: u32) -> Self {
        Self::Unsigned(u64::from(v))
    }
}

impl From<i64> for OpaqueValue {
    fn from(v: i64) -> Self {
        Self::Signed(v)
    }
}

impl From<String> for OpaqueValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for OpaqueValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec<u8>> for OpaqueValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<OpaqueValue>> From<Option<T>> for OpaqueValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A host accessor could not produce a required value.
///
/// Raised by implementations of the host accessor traits, e.g. when a
/// member's type handle does not resolve to a type id or a bookmark place
/// cannot be mapped back to an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("host could not read `{field}`: {reason}")]
pub struct HostReadError {
    /// Name of the field that was being read.
    pub field: &'static str,
    /// Host-provided description of the failure.
    pub reason: String,
}

impl HostReadError {
    /// Creates a new read error for `field`.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// What happened to an external language binding in `extlang_changed`.
///
/// The event keeps the raw integer; this is a decoding helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExtlangChange {
    /// A language was installed.
    Installed = 0,
    /// A language was removed.
    Removed = 1,
    /// The default language changed.
    DefaultChanged = 2,
}

impl ExtlangChange {
    /// Decodes the host's change code.
    ///
    /// Returns `None` for codes the host does not document.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Installed),
            1 => Some(Self::Removed),
            2 => Some(Self::DefaultChanged),
            _ => None,
        }
    }

    /// Returns the string label for this change.
    pub fn label(self) -> &'static str {
        match self {
            Self::Installed => "INSTALLED",
            Self::Removed => "REMOVED",
            Self::DefaultChanged => "DEFAULT_CHANGED",
        }
    }
}
