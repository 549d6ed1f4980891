//! Line-oriented front end for a single session.
//!
//! Reads `{"event": ..., "data": ...}` messages from stdin, one per line,
//! and writes the reply events to stdout. Logs go to stderr; set
//! `RUST_LOG=debug` for request-level detail.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mulligan_sim::coordinator::{BackgroundSink, Coordinator, InboundMessage, TracingSink};
use mulligan_sim::core::MulliganConfig;

#[derive(Debug, Parser)]
#[command(name = "mulligan-repl", about = "Deck code and mulligan requests over stdin/stdout")]
struct Args {
    /// JSON config file; fields left out keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root seed, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Append mulligan records (length-prefixed bincode) to this file
    /// instead of logging them.
    #[arg(long)]
    analytics: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MulliganConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let queue_capacity = config.analytics_queue_capacity;
    let builder = Coordinator::builder(config);
    let coordinator = match &args.analytics {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening analytics file {}", path.display()))?;
            builder
                .sink(BackgroundSink::with_capacity(BufWriter::new(file), queue_capacity)?)
                .build()?
        }
        None => builder.sink(TracingSink).build()?,
    };

    let session = coordinator.connect()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let message: InboundMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(session_id = %session, error = %err, "unparseable message");
                continue;
            }
        };
        if let Some(event) = coordinator.handle_message(&session, message) {
            serde_json::to_writer(&mut out, &event)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    coordinator.disconnect(&session);
    Ok(())
}
