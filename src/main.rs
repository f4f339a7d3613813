use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use outmux::config::Config;
use outmux::dispatch::Dispatcher;
use outmux::term::{TerminalOptions, TerminalRegistry};
use outmux::transport::{self, ChannelSink};

/// Multiplex named output streams into line-buffered terminal output.
///
/// Reads newline-delimited JSON requests from stdin and renders the
/// resulting terminal events to stdout.
#[derive(Parser)]
#[command(name = "outmux", version)]
struct Args {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter directive, overriding the configured one.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path).context("loading config")?,
        None => Config::load().context("loading config")?,
    };

    let filter = args.log_level.as_deref().unwrap_or(&config.log_filter);
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let registry = Arc::new(TerminalRegistry::with_options(
        ChannelSink::factory(events_tx),
        TerminalOptions {
            preserve_focus: config.terminal.preserve_focus,
        },
    ));
    let dispatcher = Dispatcher::new(registry);

    let renderer = tokio::spawn(transport::render(events_rx, tokio::io::stdout()));

    let stdin = tokio::io::stdin();
    let summary = transport::run_unbuffered(stdin, &dispatcher, config.transport.strict_decode)
        .await
        .context("transport failed")?;
    tracing::info!(
        dispatched = summary.dispatched,
        skipped = summary.skipped,
        streams = dispatcher.registry().len(),
        "input drained"
    );

    // Dropping the dispatcher releases the last event sender, which lets the
    // renderer finish flushing and exit.
    drop(dispatcher);
    renderer.await.context("renderer panicked")??;

    Ok(())
}
