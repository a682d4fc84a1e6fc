//! Event sinks and the in-memory event journal.

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, JournalError};
use crate::event::{EventDomain, OplogEvent};

/// Receives captured events.
///
/// The recorder hands every accepted event to its sink by value; the sink
/// owns it from then on.
pub trait EventSink {
    fn accept(&mut self, event: OplogEvent) -> Result<(), CaptureError>;
}

impl EventSink for Vec<OplogEvent> {
    fn accept(&mut self, event: OplogEvent) -> Result<(), CaptureError> {
        self.push(event);
        Ok(())
    }
}

/// One journal record: an event and its sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Monotonically increasing, starting at 1.
    pub seq: u64,
    pub event: OplogEvent,
}

/// Append-only, in-memory event log.
///
/// Sequence numbers start at 1 and increase by one per appended event, so a
/// reader can resume from the last sequence number it saw with [`since`].
///
/// [`since`]: EventJournal::since
#[derive(Debug, Clone, Default)]
pub struct EventJournal {
    entries: Vec<JournalEntry>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the sequence number the next appended event will get.
    pub fn next_seq(&self) -> u64 {
        self.entries.last().map_or(1, |entry| entry.seq + 1)
    }

    /// Appends an event and returns its sequence number.
    pub fn append(&mut self, event: OplogEvent) -> u64 {
        let seq = self.next_seq();
        self.entries.push(JournalEntry { seq, event });
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    /// Returns every entry with a sequence number greater than `seq`.
    pub fn since(&self, seq: u64) -> &[JournalEntry] {
        let start = self.entries.partition_point(|entry| entry.seq <= seq);
        &self.entries[start..]
    }

    /// Returns the entries whose kind belongs to `domain`.
    pub fn by_domain(&self, domain: EventDomain) -> impl Iterator<Item = &JournalEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.event.domain() == domain)
    }

    /// Serializes every event as one JSON document per line.
    ///
    /// Sequence numbers are not written; they are reassigned on import.
    pub fn to_json_lines(&self) -> Result<String, JournalError> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.event.to_json()?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Rebuilds a journal from JSON lines. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Line`] with the 1-based line number of the
    /// first line that does not parse as an event.
    pub fn from_json_lines(input: &str) -> Result<Self, JournalError> {
        let mut journal = Self::new();
        for (idx, line) in input.lines().enumerate() {
            let line_text = line.trim();
            if line_text.is_empty() {
                continue;
            }
            let event = OplogEvent::from_json(line_text).map_err(|source| JournalError::Line {
                line: idx + 1,
                source,
            })?;
            journal.append(event);
        }
        Ok(journal)
    }
}

impl EventSink for EventJournal {
    fn accept(&mut self, event: OplogEvent) -> Result<(), CaptureError> {
        let seq = self.append(event);
        tracing::trace!(seq, "journal appended event");
        Ok(())
    }
}
