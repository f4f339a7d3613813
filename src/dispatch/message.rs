//! Wire shape of the output requests the dispatcher understands.

use serde::{Deserialize, Serialize};

/// One request from the language server's output channel.
///
/// The `kind` tag selects the variant; anything outside these four kinds
/// fails to decode and never reaches the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputRequest {
    /// Append raw text to the stream's terminal.
    Write { stream: String, text: String },
    /// Bring the stream's terminal to the foreground.
    Show { stream: String },
    /// Close the stream's terminal (it stays reusable).
    Close { stream: String },
    /// Clear the stream's terminal display.
    Reset { stream: String },
}

impl OutputRequest {
    /// Stream name the request targets.
    pub fn stream(&self) -> &str {
        match self {
            OutputRequest::Write { stream, .. }
            | OutputRequest::Show { stream }
            | OutputRequest::Close { stream }
            | OutputRequest::Reset { stream } => stream,
        }
    }

    /// Lowercase kind tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputRequest::Write { .. } => "write",
            OutputRequest::Show { .. } => "show",
            OutputRequest::Close { .. } => "close",
            OutputRequest::Reset { .. } => "reset",
        }
    }
}
