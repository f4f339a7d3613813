//! Outbound side of the transport: a channel-backed render sink and the task
//! that drains it to a writer.
//!
//! Terminal instances emit synchronously; the channel decouples them from the
//! async writer without reordering anything.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::term::{RenderSink, SinkFactory};

/// One event as it crosses from a terminal to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Write {
        stream: String,
        data: String,
    },
    Closed {
        stream: String,
    },
    Visible {
        stream: String,
        preserve_focus: bool,
    },
}

/// Render sink that forwards every event onto a shared channel, tagged with
/// its stream name.
pub struct ChannelSink {
    stream: String,
    events: mpsc::UnboundedSender<SinkEvent>,
}

impl ChannelSink {
    /// Sink factory handing each stream a sender onto the shared channel.
    pub fn factory(events: mpsc::UnboundedSender<SinkEvent>) -> SinkFactory {
        Arc::new(move |name| {
            Arc::new(ChannelSink {
                stream: name.to_string(),
                events: events.clone(),
            }) as Arc<dyn RenderSink>
        })
    }

    fn send(&self, event: SinkEvent) {
        // Receiver gone means the renderer shut down first; nothing to show
        // the event on.
        if self.events.send(event).is_err() {
            tracing::trace!(stream = %self.stream, "render channel closed, event dropped");
        }
    }
}

impl RenderSink for ChannelSink {
    fn write_event(&self, data: String) {
        self.send(SinkEvent::Write {
            stream: self.stream.clone(),
            data,
        });
    }

    fn closed(&self) {
        self.send(SinkEvent::Closed {
            stream: self.stream.clone(),
        });
    }

    fn make_visible(&self, stream: &str, preserve_focus: bool) {
        self.send(SinkEvent::Visible {
            stream: stream.to_string(),
            preserve_focus,
        });
    }
}

/// Drain sink events to `out` until every sender is dropped.
///
/// Write events go to the writer verbatim; visibility and close changes are
/// only logged, since a plain writer has no surface to raise or drop.
pub async fn render<W>(
    mut events: mpsc::UnboundedReceiver<SinkEvent>,
    mut out: W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = events.recv().await {
        match event {
            SinkEvent::Write { stream, data } => {
                tracing::trace!(stream = %stream, len = data.len(), "render write");
                out.write_all(data.as_bytes()).await?;
                out.flush().await?;
            }
            SinkEvent::Visible {
                stream,
                preserve_focus,
            } => {
                tracing::debug!(stream = %stream, preserve_focus, "stream visible");
            }
            SinkEvent::Closed { stream } => {
                tracing::debug!(stream = %stream, "stream closed");
            }
        }
    }
    Ok(())
}
