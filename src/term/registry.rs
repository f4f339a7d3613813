//! Named terminal registry.
//!
//! Guarantees at most one live [`Terminal`] per stream name. Instances are
//! created lazily on first resolution and stay registered for the life of the
//! registry; closing a terminal flips its open flag but never removes it, so
//! a later message for the same stream reuses the same instance.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::term::buffer::Terminal;
use crate::term::sink::RenderSink;

/// Produces the render sink for a stream the first time it is shown.
pub type SinkFactory = Arc<dyn Fn(&str) -> Arc<dyn RenderSink> + Send + Sync>;

/// Show behavior applied on every resolution.
#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    /// Raise the terminal without stealing input focus.
    pub preserve_focus: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            preserve_focus: true,
        }
    }
}

/// Registry mapping stream names to their single terminal instance.
///
/// Constructed explicitly and passed down (not a process-global), so tests
/// and embedders can run isolated registries side by side.
pub struct TerminalRegistry {
    terminals: Mutex<HashMap<String, Terminal>>,
    sink_factory: SinkFactory,
    options: TerminalOptions,
}

impl TerminalRegistry {
    pub fn new(sink_factory: SinkFactory) -> Self {
        Self::with_options(sink_factory, TerminalOptions::default())
    }

    pub fn with_options(sink_factory: SinkFactory, options: TerminalOptions) -> Self {
        Self {
            terminals: Mutex::new(HashMap::new()),
            sink_factory,
            options,
        }
    }

    /// Return the terminal for `name`, creating and showing it on demand.
    ///
    /// Every resolution ensures the terminal is shown: the sink is bound
    /// lazily on first show (which also opens the terminal, mirroring the
    /// host attaching the surface) and `make_visible` is invoked each time.
    /// Two resolutions of one name always yield the same instance.
    pub fn resolve(&self, name: &str) -> Terminal {
        let terminal = {
            let mut terminals = self.terminals.lock();
            match terminals.get(name) {
                Some(existing) => existing.clone(),
                None => {
                    let created = Terminal::new(name);
                    terminals.insert(name.to_string(), created.clone());
                    tracing::debug!(stream = %name, "created terminal");
                    created
                }
            }
        };

        let factory = Arc::clone(&self.sink_factory);
        let stream = terminal.name().to_string();
        if terminal.bind_sink_with(move || factory(&stream)) {
            terminal.open();
        }
        terminal.make_visible(self.options.preserve_focus);

        terminal
    }

    /// Handles to every terminal created so far, in no particular order.
    pub fn terminals(&self) -> Vec<Terminal> {
        self.terminals.lock().values().cloned().collect()
    }

    /// Flush the pending buffer of every registered terminal.
    ///
    /// End-of-stream cleanup: trailing unterminated output becomes a final
    /// line instead of being dropped.
    pub fn flush_all(&self) {
        for terminal in self.terminals() {
            terminal.flush_pending();
        }
    }

    /// Number of distinct stream names ever resolved.
    pub fn len(&self) -> usize {
        self.terminals.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.lock().is_empty()
    }
}
