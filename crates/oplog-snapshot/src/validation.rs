//! Range and length checks shared by the validated snapshot types.
//!
//! Every check names the field it guards so that a rejected snapshot can be
//! traced back to the exact host value that was out of domain.

use crate::error::SnapshotError;

/// Number of operand slots in an instruction.
pub const OPERAND_SLOTS: usize = 8;

/// Number of default segment register slots in a segment.
pub const DEFSR_SLOTS: usize = 16;

/// Checks that a segment bitness is one of 0 (16-bit), 1 (32-bit) or 2 (64-bit).
pub fn check_bitness(value: i64) -> Result<u8, SnapshotError> {
    match value {
        0..=2 => Ok(value as u8),
        _ => Err(SnapshotError::InvalidBitness(value)),
    }
}

/// Checks that `value` fits in an unsigned byte.
pub fn check_u8(field: &'static str, value: i64) -> Result<u8, SnapshotError> {
    u8::try_from(value).map_err(|_| out_of_range(field, value, u8::MAX.into()))
}

/// Checks that `value` fits in an unsigned 16-bit word.
pub fn check_u16(field: &'static str, value: i64) -> Result<u16, SnapshotError> {
    u16::try_from(value).map_err(|_| out_of_range(field, value, u16::MAX.into()))
}

/// Checks that a fixed-size table has exactly `expected` entries.
pub fn check_len<T>(field: &'static str, items: &[T], expected: usize) -> Result<(), SnapshotError> {
    if items.len() != expected {
        return Err(SnapshotError::WrongLength {
            field,
            expected,
            actual: items.len(),
        });
    }
    Ok(())
}

fn out_of_range(field: &'static str, value: i64, max: i64) -> SnapshotError {
    SnapshotError::OutOfRange {
        field,
        value,
        min: 0,
        max,
    }
}
