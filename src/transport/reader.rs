//! Inbound side of the transport: newline-delimited JSON requests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::dispatch::{Dispatcher, OutputRequest};
use crate::transport::TransportError;

/// Counters reported after the transport drains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransportSummary {
    pub dispatched: u64,
    pub skipped: u64,
}

/// Consume requests from `reader` until EOF, dispatching each in arrival
/// order.
///
/// Blank lines are ignored. A line that fails to decode (bad JSON, unknown
/// kind, missing field, empty stream name) is the transport's problem, not
/// the dispatcher's: with `strict` set it aborts the run, otherwise it is
/// logged and skipped. On EOF every terminal's pending buffer is flushed so
/// trailing unterminated output still renders.
pub async fn run<R>(
    reader: R,
    dispatcher: &Dispatcher,
    strict: bool,
) -> Result<TransportSummary, TransportError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = TransportSummary::default();
    let mut line_number = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        match decode(&line, line_number) {
            Ok(request) => {
                dispatcher.dispatch(request);
                summary.dispatched += 1;
            }
            Err(error) if strict => return Err(error),
            Err(error) => {
                tracing::warn!(%error, "skipping undecodable request");
                summary.skipped += 1;
            }
        }
    }

    dispatcher.registry().flush_all();
    tracing::debug!(
        dispatched = summary.dispatched,
        skipped = summary.skipped,
        "transport drained"
    );
    Ok(summary)
}

fn decode(line: &str, line_number: u64) -> Result<OutputRequest, TransportError> {
    let request: OutputRequest =
        serde_json::from_str(line).map_err(|source| TransportError::Decode {
            line: line_number,
            source,
        })?;
    if request.stream().is_empty() {
        return Err(TransportError::EmptyStream { line: line_number });
    }
    Ok(request)
}

/// Convenience wrapper for unbuffered readers.
pub async fn run_unbuffered<R>(
    reader: R,
    dispatcher: &Dispatcher,
    strict: bool,
) -> Result<TransportSummary, TransportError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    run(BufReader::new(reader), dispatcher, strict).await
}
