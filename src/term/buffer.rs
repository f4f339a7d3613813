//! Line-buffering terminal instance.
//!
//! Converts an arbitrarily chunked character stream into discrete write
//! events. A `\n` flushes the pending buffer as a complete line; a `\r`
//! flushes it as an inline overwrite of the current display line. Everything
//! else accumulates until the next terminator, so a line split across any
//! number of chunks renders exactly once.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::term::sink::RenderSink;

/// Erase the current display line and return the cursor to column one.
const ERASE_LINE: &str = "\x1b[2K\x1b[1G";

/// Clear the screen (including scrollback) and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";

/// Canonical terminator appended to every completed line.
const LINE_ENDING: &str = "\r\n";

struct TerminalState {
    /// Characters accumulated since the last `\n`/`\r`. Never contains a
    /// terminator character.
    pending: String,
    is_open: bool,
    sink: Option<Arc<dyn RenderSink>>,
}

/// Shared handle to one line-buffering terminal.
///
/// Cloning the handle does not clone the terminal; all clones observe the
/// same buffer and open state. Mutation is serialized by an internal lock,
/// so handles can be used from multiple tasks without external coordination.
#[derive(Clone)]
pub struct Terminal {
    name: Arc<str>,
    state: Arc<Mutex<TerminalState>>,
}

impl Terminal {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(Mutex::new(TerminalState {
                pending: String::new(),
                is_open: false,
                sink: None,
            })),
        }
    }

    /// Stream name this terminal renders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if both handles refer to the same terminal instance.
    pub fn same_instance(&self, other: &Terminal) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Mark the terminal open. Input is only accepted while open.
    pub fn open(&self) {
        self.state.lock().is_open = true;
        tracing::debug!(stream = %self.name, "terminal opened");
    }

    /// Mark the terminal closed and notify the sink.
    ///
    /// The pending buffer is kept but not flushed; callers that want the
    /// partial line displayed must call [`flush_pending`](Self::flush_pending)
    /// first.
    pub fn close(&self) {
        let sink = {
            let mut state = self.state.lock();
            state.is_open = false;
            state.sink.clone()
        };
        if let Some(sink) = sink {
            sink.closed();
        }
        tracing::debug!(stream = %self.name, "terminal closed");
    }

    /// Whether the terminal currently accepts input.
    pub fn is_open(&self) -> bool {
        self.state.lock().is_open
    }

    /// Accept a chunk of raw output.
    ///
    /// Silently drops the chunk while the terminal is closed; this is the
    /// documented contract, not an error. Characters are processed strictly
    /// left to right, so terminators split across chunks behave exactly like
    /// terminators inside one chunk.
    pub fn ingest(&self, chunk: &str) {
        let mut state = self.state.lock();
        if !state.is_open {
            tracing::trace!(stream = %self.name, len = chunk.len(), "dropped input while closed");
            return;
        }

        for ch in chunk.chars() {
            match ch {
                '\n' => {
                    let line = state.pending.trim().to_string();
                    state.pending.clear();
                    emit(&state, format!("{line}{LINE_ENDING}"));
                }
                '\r' => {
                    let line = state.pending.trim().to_string();
                    state.pending.clear();
                    emit(&state, format!("{ERASE_LINE}{line}"));
                }
                _ => state.pending.push(ch),
            }
        }
    }

    /// Flush a partially accumulated line as a complete line event.
    ///
    /// Emits nothing if the buffer is empty or whitespace-only. Used for
    /// end-of-stream cleanup so trailing unterminated output is not lost.
    pub fn flush_pending(&self) {
        let mut state = self.state.lock();
        let line = state.pending.trim().to_string();
        if line.is_empty() {
            return;
        }
        state.pending.clear();
        emit(&state, format!("{line}{LINE_ENDING}"));
    }

    /// Clear the full display and home the cursor.
    ///
    /// Does not touch the pending buffer: a line completed by a later chunk
    /// still renders normally.
    pub fn clear(&self) {
        let state = self.state.lock();
        emit(&state, CLEAR_SCREEN.to_string());
    }

    /// Bind the render sink, returning true if this was the first binding.
    ///
    /// The factory is only invoked when no sink is bound yet, making repeated
    /// show operations idempotent.
    pub(crate) fn bind_sink_with<F>(&self, factory: F) -> bool
    where
        F: FnOnce() -> Arc<dyn RenderSink>,
    {
        let mut state = self.state.lock();
        if state.sink.is_some() {
            return false;
        }
        state.sink = Some(factory());
        true
    }

    /// Ask the bound sink to bring this terminal's surface to the front.
    pub(crate) fn make_visible(&self, preserve_focus: bool) {
        let sink = self.state.lock().sink.clone();
        if let Some(sink) = sink {
            sink.make_visible(&self.name, preserve_focus);
        }
    }
}

fn emit(state: &TerminalState, data: String) {
    if let Some(sink) = &state.sink {
        sink.write_event(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::sink::{RecordingSink, SinkRecord};

    fn open_terminal(sink: &Arc<RecordingSink>) -> Terminal {
        let terminal = Terminal::new("test");
        let bound: Arc<dyn RenderSink> = sink.clone();
        terminal.bind_sink_with(move || bound);
        terminal.open();
        terminal
    }

    #[test]
    fn newline_flushes_trimmed_line() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("  hello world  \n");

        assert_eq!(sink.writes(), vec!["hello world\r\n".to_string()]);
    }

    #[test]
    fn three_lines_emit_three_events_in_order() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("a\nb\nc\n");

        assert_eq!(
            sink.writes(),
            vec!["a\r\n".to_string(), "b\r\n".to_string(), "c\r\n".to_string()]
        );
    }

    #[test]
    fn terminator_split_across_chunks() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("abc");
        terminal.ingest("\ndef");

        assert_eq!(sink.writes(), vec!["abc\r\n".to_string()]);

        terminal.flush_pending();
        assert_eq!(
            sink.writes(),
            vec!["abc\r\n".to_string(), "def\r\n".to_string()]
        );
    }

    #[test]
    fn carriage_return_emits_inline_overwrite() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("x\ry");

        assert_eq!(sink.writes(), vec!["\x1b[2K\x1b[1Gx".to_string()]);

        // "y" is still pending, not emitted on its own.
        terminal.flush_pending();
        assert_eq!(
            sink.writes(),
            vec!["\x1b[2K\x1b[1Gx".to_string(), "y\r\n".to_string()]
        );
    }

    #[test]
    fn input_while_closed_is_dropped() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);
        terminal.close();

        terminal.ingest("lost\n");
        assert_eq!(sink.writes(), Vec::<String>::new());

        // Reopening does not resurrect the dropped input.
        terminal.open();
        terminal.flush_pending();
        assert_eq!(sink.writes(), Vec::<String>::new());
    }

    #[test]
    fn flush_pending_skips_whitespace_only_buffer() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("   \t ");
        terminal.flush_pending();

        assert_eq!(sink.writes(), Vec::<String>::new());
    }

    #[test]
    fn clear_does_not_flush_the_buffer() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.ingest("partial");
        terminal.clear();
        terminal.ingest(" line\n");

        assert_eq!(
            sink.writes(),
            vec!["\x1b[2J\x1b[3J\x1b[H".to_string(), "partial line\r\n".to_string()]
        );
    }

    #[test]
    fn close_fires_one_notification() {
        let sink = RecordingSink::new();
        let terminal = open_terminal(&sink);

        terminal.close();

        assert_eq!(sink.close_count(), 1);
        assert!(!terminal.is_open());
    }

    #[test]
    fn chunk_boundary_independence() {
        let whole_sink = RecordingSink::new();
        let whole = open_terminal(&whole_sink);
        whole.ingest("one long line\n");

        let split_sink = RecordingSink::new();
        let split = open_terminal(&split_sink);
        for ch in "one long line\n".chars() {
            split.ingest(&ch.to_string());
        }

        assert_eq!(whole_sink.records(), split_sink.records());
        assert_eq!(
            whole_sink.records(),
            vec![SinkRecord::Write("one long line\r\n".to_string())]
        );
    }
}
