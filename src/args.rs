use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;

use crate::config::{EngineConfig, FileConfig, QueueConfig};
use crate::model::UserSnapshot;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

/// Parse the command line and merge it with the optional TOML file.
///
/// # Errors
/// Returns an error if the config file is unreadable or invalid, or if the
/// snapshot file does not deserialize into user snapshots.
pub fn args_checks() -> Result<CleanArgs> {
    resolve_args(Args::parse())
}

/// Merge parsed arguments over the TOML file and the built-in defaults.
///
/// Command line (or environment) values win over the file, which wins over
/// the defaults.
///
/// # Errors
/// Returns an error if the config file is unreadable or invalid, if a
/// setting is out of range, or if the snapshot json has the wrong field types.
pub fn resolve_args(args: Args) -> Result<CleanArgs> {
    let file_config = match args.config_toml.as_deref() {
        Some(path) => read_file_config(path)?,
        None => FileConfig::default(),
    };

    let engine = file_config.engine.unwrap_or_default();
    check_engine_config(&engine)?;

    let file_queue = file_config.queue.unwrap_or_default();
    let max_retries = match args.max_retries {
        Some(n) => u32::try_from(n).context("max retries out of range")?,
        None => file_queue.max_retries,
    };
    let queue = QueueConfig {
        batch_size: args.batch_size.unwrap_or(file_queue.batch_size),
        max_retries,
    };
    if queue.batch_size == 0 || queue.max_retries == 0 {
        bail!("queue batch_size and max_retries must both be above zero");
    }

    let snapshots: Vec<UserSnapshot> =
        serde_json::from_value(args.snapshot).context("parse snapshot json")?;

    Ok(CleanArgs {
        snapshots,
        engine,
        queue,
        output: args.output,
        log_level: args.log_level,
    })
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config toml {}", path.display()))?;
    FileConfig::from_toml_str(&contents)
        .with_context(|| format!("parse config toml {}", path.display()))
}

fn check_engine_config(engine: &EngineConfig) -> Result<()> {
    if engine.esr_window_size == 0 {
        bail!("engine esr_window_size must be above zero");
    }
    if !engine.max_score_differential.is_finite() || engine.max_score_differential <= 0.0 {
        bail!("engine max_score_differential must be a positive number");
    }
    if engine.soft_cap_threshold > engine.hard_cap_threshold {
        bail!("engine soft_cap_threshold can't exceed hard_cap_threshold");
    }
    Ok(())
}
