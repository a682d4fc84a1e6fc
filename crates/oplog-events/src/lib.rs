//! Operation log for an interactive binary-analysis database.
//!
//! Every database-mutating host notification is turned into an immutable,
//! timestamped [`OplogEvent`] that carries frozen snapshots of the host
//! structures involved. Events are grouped into seven domains:
//!
//! | Domain | Example kinds |
//! |--------|---------------|
//! | `SEGMENT` | `segm_added`, `segm_moved`, `allsegs_moved` |
//! | `FUNCTION` | `func_added`, `func_deleted`, `frame_udm_changed` |
//! | `ITEM` | `make_code`, `byte_patched`, `ti_changed` |
//! | `ANNOTATION` | `renamed`, `cmt_changed`, `sgr_changed` |
//! | `NAVIGATION` | `bookmark_changed`, `determined_main` |
//! | `DIRECTORY` | `dirtree_mkdir`, `dirtree_move` |
//! | `LOCAL_TYPE` | `local_types_changed`, `lt_udm_renamed` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use oplog_events::{capture, load_config, EventJournal, Recorder};
//!
//! let config = load_config(Some("oplog.toml"))?;
//! let journal = EventJournal::with_capacity(config.capture.journal_capacity);
//! let mut recorder = Recorder::new(journal, &config.capture);
//!
//! // inside the host's `renamed` callback:
//! recorder.record(capture::renamed(ea, new_name, local_name, old_name))?;
//! ```

pub mod capture;
mod config;
mod error;
mod event;
mod journal;
mod recorder;
mod telemetry;

pub use capture::CaptureResult;
pub use config::{
    apply_env_overrides, load_config, CaptureConfig, ConfigError, LoggingConfig, OplogConfig,
};
pub use error::{CaptureError, JournalError};
pub use event::{
    EventDomain, EventKind, EventPayload, OplogEvent, ParseEventDomainError, ParseEventKindError,
};
pub use journal::{EventJournal, EventSink, JournalEntry};
pub use recorder::{is_ignored_notification, CaptureStats, Recorder, IGNORED_NOTIFICATIONS};
pub use telemetry::init_tracing;
