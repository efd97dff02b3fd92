use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{EngineConfig, QueueConfig};
use crate::model::UserSnapshot;

#[derive(Parser, Debug)]
#[command(author, version, about = "Recalculate handicap indexes from round history snapshots", long_about = None)]
pub struct Args {
    /// JSON array of user snapshots: profile, approved rounds, tees, holes and scores.
    #[arg(
        short = 's',
        long,
        value_name = "SNAPSHOT_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub snapshot: Value,
    /// TOML file with optional [engine] and [queue] sections.
    #[arg(
        short = 'c',
        long,
        value_name = "CONFIG_TOML",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub config_toml: Option<PathBuf>,
    /// Users processed per queue batch.
    #[arg(
        long,
        value_name = "BATCH_SIZE",
        env = "HANDICAP_QUEUE_BATCH_SIZE",
        value_parser = crate::args::validation::check_positive_number
    )]
    pub batch_size: Option<usize>,
    /// Attempts before a user's job is marked failed.
    #[arg(
        long,
        value_name = "MAX_RETRIES",
        env = "HANDICAP_MAX_RETRIES",
        value_parser = crate::args::validation::check_positive_number
    )]
    pub max_retries: Option<usize>,
    /// Where to write the outcomes. Defaults to stdout.
    #[arg(short = 'o', long, value_name = "OUTPUT_JSON")]
    pub output: Option<PathBuf>,
    #[arg(long, value_name = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub snapshots: Vec<UserSnapshot>,
    pub engine: EngineConfig,
    pub queue: QueueConfig,
    pub output: Option<PathBuf>,
    pub log_level: String,
}
