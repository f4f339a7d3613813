//! Render sink contract between a terminal instance and the surface that
//! displays it.
//!
//! The terminal core never talks to a concrete display. It emits opaque
//! strings (already carrying their control sequences) through this trait and
//! leaves rendering to the host side.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receiving end of a terminal's output.
///
/// Implementations must deliver write events in emission order. `closed` is
/// fired when the owning terminal is closed; `make_visible` must be
/// idempotent for a given stream name.
pub trait RenderSink: Send + Sync {
    /// Deliver one write event (a line or an inline-overwrite sequence).
    fn write_event(&self, data: String);

    /// The owning terminal was closed.
    fn closed(&self);

    /// Bring the surface for `stream` to the foreground. With
    /// `preserve_focus` set, the surface is raised without stealing input
    /// focus from wherever the user is typing.
    fn make_visible(&self, stream: &str, preserve_focus: bool);
}

/// Something recorded by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkRecord {
    Write(String),
    Closed,
    Visible {
        stream: String,
        preserve_focus: bool,
    },
}

/// In-memory sink that records everything it receives.
///
/// Used by the test suites to assert on emission order and by embedders that
/// want to capture output instead of displaying it.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<SinkRecord>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of all recorded events, in arrival order.
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records.lock().clone()
    }

    /// Only the write events, in arrival order.
    pub fn writes(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter_map(|record| match record {
                SinkRecord::Write(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of close notifications received.
    pub fn close_count(&self) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| matches!(record, SinkRecord::Closed))
            .count()
    }

    /// Number of `make_visible` calls received.
    pub fn visible_count(&self) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| matches!(record, SinkRecord::Visible { .. }))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn write_event(&self, data: String) {
        self.records.lock().push(SinkRecord::Write(data));
    }

    fn closed(&self) {
        self.records.lock().push(SinkRecord::Closed);
    }

    fn make_visible(&self, stream: &str, preserve_focus: bool) {
        self.records.lock().push(SinkRecord::Visible {
            stream: stream.to_string(),
            preserve_focus,
        });
    }
}
