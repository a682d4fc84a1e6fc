//! Error types for snapshot conversion and validation.

use oplog_types::HostReadError;

/// Errors that can occur while freezing a host structure into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A required field could not be read from the host structure.
    #[error("failed to read {snapshot} from host: {source}")]
    HostRead {
        /// The snapshot being built (e.g. `"type member"`).
        snapshot: &'static str,
        /// The underlying host failure.
        source: HostReadError,
    },

    /// The segment addressing width is not one of the three host encodings.
    #[error("bitness must be 0 (16-bit), 1 (32-bit) or 2 (64-bit), got {0}")]
    InvalidBitness(i64),

    /// A numeric field is outside its inclusive domain.
    #[error("{field} must be in range {min}-{max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A fixed-size table has the wrong number of entries.
    #[error("{field} must have exactly {expected} elements, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An operand does not sit in the slot matching its own index.
    #[error("operand in slot {slot} reports index {index}")]
    OperandIndexMismatch { slot: usize, index: u8 },
}

impl SnapshotError {
    /// Returns the name of the field that caused the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::HostRead { source, .. } => source.field,
            Self::InvalidBitness(_) => "bitness",
            Self::OutOfRange { field, .. } | Self::WrongLength { field, .. } => field,
            Self::OperandIndexMismatch { .. } => "ops",
        }
    }

    /// Returns `true` for domain violations, as opposed to host read failures.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::HostRead { .. })
    }
}
