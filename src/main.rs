use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use rusty_handicap::args;
use rusty_handicap::handicap::HandicapEngine;
use rusty_handicap::queue::{MemoryStore, run_until_drained};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::args_checks()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rusty_handicap={}", args.log_level).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = MemoryStore::new();
    for snapshot in args.snapshots {
        store.enqueue_snapshot(snapshot, "recalculate").await;
    }

    let engine = HandicapEngine::new(args.engine);
    let summary = run_until_drained(&store, &engine, &args.queue)
        .await
        .context("drain handicap queue")?;
    info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all users processed"
    );

    let outcomes = store.outcomes().await;
    let json = serde_json::to_string_pretty(&outcomes).context("serialize outcomes")?;
    match args.output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("write outcomes to {}", path.display()))?,
        None => writeln!(std::io::stdout(), "{json}").context("write outcomes to stdout")?,
    }

    Ok(())
}
