//! Routes decoded output requests to terminal operations.

use std::sync::Arc;

use crate::dispatch::message::OutputRequest;
use crate::term::TerminalRegistry;

/// Maps each request kind to one operation on the registry-resolved terminal.
///
/// Dispatch is synchronous and in arrival order; there is no queuing or
/// coalescing here. The match is exhaustive over the request kinds, so a new
/// kind cannot be added without a handler.
pub struct Dispatcher {
    registry: Arc<TerminalRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<TerminalRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher resolves against.
    pub fn registry(&self) -> &Arc<TerminalRegistry> {
        &self.registry
    }

    /// Handle one request to completion.
    pub fn dispatch(&self, request: OutputRequest) {
        tracing::trace!(kind = request.kind(), stream = %request.stream(), "dispatching");
        match request {
            OutputRequest::Write { stream, text } => {
                self.registry.resolve(&stream).ingest(&text);
            }
            OutputRequest::Show { stream } => {
                // Resolution itself shows the terminal.
                self.registry.resolve(&stream);
            }
            OutputRequest::Close { stream } => {
                self.registry.resolve(&stream).close();
            }
            OutputRequest::Reset { stream } => {
                self.registry.resolve(&stream).clear();
            }
        }
    }
}
