//! Rule constants and their overridable configuration.
//!
//! Every threshold the engine uses lives here so tests (and deployments
//! following a different rule variant) can vary them without touching
//! module state.

use serde::{Deserialize, Serialize};

pub const EXCEPTIONAL_ROUND_THRESHOLD: f64 = 7.0;
pub const EXCEPTIONAL_ROUND_MAJOR_THRESHOLD: f64 = 10.0;
pub const MAX_SCORE_DIFFERENTIAL: f64 = 54.0;
pub const ESR_WINDOW_SIZE: usize = 20;
pub const SOFT_CAP_THRESHOLD: f64 = 3.0;
pub const HARD_CAP_THRESHOLD: f64 = 5.0;
pub const LOW_HANDICAP_WINDOW_DAYS: i64 = 365;
pub const CAPS_MIN_ROUNDS: usize = 20;
pub const ESTABLISHED_HANDICAP_MIN_ROUNDS: usize = 3;

/// Slope of a course of standard difficulty.
pub const SLOPE_BASELINE: f64 = 113.0;
pub const MIN_SLOPE_RATING: f64 = 45.0;
pub const MAX_SLOPE_RATING: f64 = 165.0;
pub const MAX_HOLE_STROKES: i32 = 99;
pub const HOLES_PER_TEE: usize = 18;

pub const DEFAULT_BATCH_SIZE: usize = 25;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Thresholds for the handicap pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Index minus differential at which a round counts as exceptional.
    #[serde(default = "default_exceptional_round_threshold")]
    pub exceptional_round_threshold: f64,

    /// Difference at which the exceptional score reduction doubles to 2.
    #[serde(default = "default_exceptional_round_major_threshold")]
    pub exceptional_round_major_threshold: f64,

    /// Ceiling for every handicap index; also the index of a player with
    /// fewer than three differentials.
    #[serde(default = "default_max_score_differential")]
    pub max_score_differential: f64,

    /// Trailing rounds used for averaging and for ESR back-application.
    #[serde(default = "default_esr_window_size")]
    pub esr_window_size: usize,

    #[serde(default = "default_soft_cap_threshold")]
    pub soft_cap_threshold: f64,

    #[serde(default = "default_hard_cap_threshold")]
    pub hard_cap_threshold: f64,

    /// Look-back for the low handicap index anchor.
    #[serde(default = "default_low_handicap_window_days")]
    pub low_handicap_window_days: i64,

    /// Caps only engage once the history holds this many approved rounds.
    #[serde(default = "default_caps_min_rounds")]
    pub caps_min_rounds: usize,

    /// Prior rounds needed before net double bogey replaces par + 5.
    #[serde(default = "default_established_handicap_min_rounds")]
    pub established_handicap_min_rounds: usize,
}

fn default_exceptional_round_threshold() -> f64 {
    EXCEPTIONAL_ROUND_THRESHOLD
}

fn default_exceptional_round_major_threshold() -> f64 {
    EXCEPTIONAL_ROUND_MAJOR_THRESHOLD
}

fn default_max_score_differential() -> f64 {
    MAX_SCORE_DIFFERENTIAL
}

fn default_esr_window_size() -> usize {
    ESR_WINDOW_SIZE
}

fn default_soft_cap_threshold() -> f64 {
    SOFT_CAP_THRESHOLD
}

fn default_hard_cap_threshold() -> f64 {
    HARD_CAP_THRESHOLD
}

fn default_low_handicap_window_days() -> i64 {
    LOW_HANDICAP_WINDOW_DAYS
}

fn default_caps_min_rounds() -> usize {
    CAPS_MIN_ROUNDS
}

fn default_established_handicap_min_rounds() -> usize {
    ESTABLISHED_HANDICAP_MIN_ROUNDS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exceptional_round_threshold: EXCEPTIONAL_ROUND_THRESHOLD,
            exceptional_round_major_threshold: EXCEPTIONAL_ROUND_MAJOR_THRESHOLD,
            max_score_differential: MAX_SCORE_DIFFERENTIAL,
            esr_window_size: ESR_WINDOW_SIZE,
            soft_cap_threshold: SOFT_CAP_THRESHOLD,
            hard_cap_threshold: HARD_CAP_THRESHOLD,
            low_handicap_window_days: LOW_HANDICAP_WINDOW_DAYS,
            caps_min_rounds: CAPS_MIN_ROUNDS,
            established_handicap_min_rounds: ESTABLISHED_HANDICAP_MIN_ROUNDS,
        }
    }
}

/// Settings for the queued batch runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum users fetched per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Attempts after which a job is marked permanently failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Shape of the optional `--config-toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub engine: Option<EngineConfig>,
    #[serde(default)]
    pub queue: Option<QueueConfig>,
}

impl FileConfig {
    /// Parse the TOML text of a config file.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or a field has the wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
