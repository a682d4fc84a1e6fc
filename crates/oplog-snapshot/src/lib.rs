//! Immutable snapshots of host analysis-database structures.
//!
//! Host notifications hand out references to live functions, instructions,
//! segments and type members that are only valid during the callback. This
//! crate copies them into owned, serializable values:
//!
//! - [`host`] defines the read-only accessor traits a host binding
//!   implements.
//! - [`FunctionSnapshot`], [`InstructionSnapshot`], [`SegmentSnapshot`],
//!   [`RangeSnapshot`], [`TypeMemberSnapshot`] and [`EnumMemberSnapshot`]
//!   are the frozen copies.
//! - [`validation`] holds the range and length rules. Segment and
//!   instruction snapshots run them on every construction path, including
//!   deserialization.

pub mod error;
pub mod function;
pub mod host;
pub mod instruction;
pub mod member;
pub mod segment;
pub mod validation;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use error::SnapshotError;
pub use function::{FunctionSnapshot, RangeSnapshot};
pub use instruction::{InstructionFields, InstructionSnapshot, OperandSnapshot, O_VOID};
pub use member::{EnumMemberSnapshot, TypeMemberSnapshot};
pub use segment::{SegmentFields, SegmentSnapshot};
pub use validation::{DEFSR_SLOTS, OPERAND_SLOTS};

#[cfg(test)]
mod tests;
