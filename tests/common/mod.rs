//! Shared test utilities.

#![allow(dead_code)]

use std::sync::Arc;

use outmux::dispatch::Dispatcher;
use outmux::term::{RecordingSink, RenderSink, TerminalRegistry};

/// Registry whose every stream shares one recording sink.
pub fn recording_registry() -> (Arc<TerminalRegistry>, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let shared = Arc::clone(&sink);
    let registry = TerminalRegistry::new(Arc::new(move |_name: &str| {
        Arc::clone(&shared) as Arc<dyn RenderSink>
    }));
    (Arc::new(registry), sink)
}

/// Dispatcher over a recording registry.
pub fn recording_dispatcher() -> (Dispatcher, Arc<RecordingSink>) {
    let (registry, sink) = recording_registry();
    (Dispatcher::new(registry), sink)
}
