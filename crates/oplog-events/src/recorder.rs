//! Routes capture results into a sink.
//!
//! The hook layer calls a capture entry point and hands the result to
//! [`Recorder::record`]. The recorder applies the domain filter, forwards
//! accepted events to its sink, logs and counts each outcome, and returns
//! failures to the caller. A failed event never affects the next one.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::capture::CaptureResult;
use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::event::{EventDomain, EventKind};
use crate::journal::EventSink;

/// Host notifications that are deliberately not recorded.
///
/// These carry no database change worth replaying (database close/save,
/// upgrade, analysis queue drained, signature and kernel config loading,
/// loader completion, flow chart construction, compiler change).
pub const IGNORED_NOTIFICATIONS: &[&str] = &[
    "closebase",
    "savebase",
    "upgraded",
    "auto_empty",
    "auto_empty_finally",
    "idasgn_loaded",
    "kernel_config_loaded",
    "loader_finished",
    "flow_chart_created",
    "compiler_changed",
];

/// Returns `true` if `name` is a host notification that is never recorded.
pub fn is_ignored_notification(name: &str) -> bool {
    IGNORED_NOTIFICATIONS.contains(&name)
}

/// Outcome counters for one recorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CaptureStats {
    /// Events handed to the sink.
    pub accepted: u64,
    /// Captures, sink writes or notifications that failed.
    pub failed: u64,
    /// Events dropped because their domain is disabled.
    pub filtered: u64,
    /// Known host notifications that are skipped on purpose.
    pub ignored: u64,
}

/// Feeds captured events into an [`EventSink`].
#[derive(Debug)]
pub struct Recorder<S: EventSink> {
    sink: S,
    disabled: BTreeSet<EventDomain>,
    stats: CaptureStats,
}

impl<S: EventSink> Recorder<S> {
    pub fn new(sink: S, config: &CaptureConfig) -> Self {
        Self {
            sink,
            disabled: config.disabled_domains.iter().copied().collect(),
            stats: CaptureStats::default(),
        }
    }

    /// Returns `true` if events of `kind` will be forwarded to the sink.
    ///
    /// The hook layer can check this before capturing to skip snapshot work.
    pub fn is_enabled(&self, kind: EventKind) -> bool {
        !self.disabled.contains(&kind.domain())
    }

    /// Forwards one capture result.
    ///
    /// # Errors
    ///
    /// Returns the capture error unchanged, [`CaptureError::KindDisabled`]
    /// if the event's domain is filtered out, or the sink's error.
    pub fn record(&mut self, result: CaptureResult) -> Result<(), CaptureError> {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                self.stats.failed += 1;
                tracing::warn!(error = %e, "event capture failed");
                return Err(e);
            }
        };

        let kind = event.kind();
        if !self.is_enabled(kind) {
            self.stats.filtered += 1;
            tracing::debug!(kind = %kind, domain = %kind.domain(), "event domain disabled, dropping");
            return Err(CaptureError::KindDisabled(kind));
        }

        match self.sink.accept(event) {
            Ok(()) => {
                self.stats.accepted += 1;
                tracing::debug!(kind = %kind, domain = %kind.domain(), "captured event");
                Ok(())
            }
            Err(e) => {
                self.stats.failed += 1;
                tracing::warn!(kind = %kind, error = %e, "sink rejected event");
                Err(e)
            }
        }
    }

    /// Skips `name` if it is a notification that is never recorded.
    pub fn notification_ignored(&mut self, name: &str) -> bool {
        if !is_ignored_notification(name) {
            return false;
        }
        self.stats.ignored += 1;
        tracing::debug!(notification = name, "ignoring host notification");
        true
    }

    /// Handles a host notification that has no capture entry point.
    ///
    /// Known ignored notifications are skipped; anything else is an error
    /// so that a new host notification cannot be lost silently.
    pub fn unmapped(&mut self, name: &str) -> Result<(), CaptureError> {
        if self.notification_ignored(name) {
            return Ok(());
        }
        self.stats.failed += 1;
        tracing::error!(notification = name, "host notification has no event kind");
        Err(CaptureError::UnmappedNotification(name.to_string()))
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
