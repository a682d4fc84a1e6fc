//! Error types for event capture and the journal.

use oplog_snapshot::SnapshotError;
use oplog_types::HostReadError;

use crate::event::EventKind;

/// Errors that can occur while capturing one host notification.
///
/// A capture error is local to the event being built; the recorder stays
/// usable for the next notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// A snapshot could not be built or failed validation.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A scalar argument could not be read from the host.
    #[error("host read error: {0}")]
    HostRead(#[from] HostReadError),

    /// The host sent a notification that has no event kind.
    #[error("unmapped host notification: {0}")]
    UnmappedNotification(String),

    /// The kind's domain is disabled in the capture configuration.
    #[error("event kind {0} is disabled")]
    KindDisabled(EventKind),

    /// The sink refused the event.
    #[error("sink error: {0}")]
    Sink(String),
}

/// Errors that can occur during journal export and import.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// JSON serialization failed.
    #[error("journal serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A JSON line could not be parsed back into an event.
    #[error("journal line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
