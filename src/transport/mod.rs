//! Transport framing around the dispatcher: newline-delimited JSON requests
//! in, sink events out. Error policy for malformed input lives here, not in
//! the dispatch table.

mod reader;
mod render;

use thiserror::Error;

pub use reader::{run, run_unbuffered, TransportSummary};
pub use render::{render, ChannelSink, SinkEvent};

/// Errors surfaced by the inbound transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: undecodable request: {source}")]
    Decode {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: request with empty stream name")]
    EmptyStream { line: u64 },
}
