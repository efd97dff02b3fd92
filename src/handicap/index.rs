//! Handicap index averaging, the low handicap index window and soft/hard caps.

use chrono::Duration;

use crate::config::{EngineConfig, HARD_CAP_THRESHOLD, MAX_SCORE_DIFFERENTIAL, SOFT_CAP_THRESHOLD};
use crate::handicap::engine::ProcessedRound;
use crate::handicap::rounding::round_half_up_1dp;
use crate::model::ApprovalStatus;

const MIN_DIFFERENTIALS: usize = 3;
const SOFT_CAP_DAMPING: f64 = 0.5;

/// How many of the best differentials count toward the index for a record
/// of `total` differentials.
#[must_use]
pub fn relevant_differential_count(total: usize) -> usize {
    match total {
        0..=5 => 1,
        6..=8 => 2,
        9..=11 => 3,
        12..=14 => 4,
        15..=16 => 5,
        17..=18 => 6,
        19 => 7,
        _ => 8,
    }
}

/// The leading slice of an ascending list that counts toward the index.
#[must_use]
pub fn get_relevant_differentials(sorted_differentials: &[f64]) -> &[f64] {
    let take = relevant_differential_count(sorted_differentials.len()).min(sorted_differentials.len());
    &sorted_differentials[..take]
}

/// Handicap index from a set of differentials, using the default ceiling.
#[must_use]
pub fn calculate_handicap_index(differentials: &[f64]) -> f64 {
    calculate_handicap_index_with(differentials, MAX_SCORE_DIFFERENTIAL)
}

/// Average of the best differentials, to one decimal, with the small-sample
/// adjustment: -2 for exactly three differentials, -1 for four or six.
///
/// Fewer than three differentials can't establish an index and yield
/// `max_index`.
#[must_use]
pub fn calculate_handicap_index_with(differentials: &[f64], max_index: f64) -> f64 {
    if differentials.len() < MIN_DIFFERENTIALS {
        return max_index;
    }
    let mut sorted = differentials.to_vec();
    sorted.sort_by(f64::total_cmp);
    let relevant = get_relevant_differentials(&sorted);
    let average = relevant.iter().sum::<f64>() / relevant.len() as f64;
    let index = round_half_up_1dp(average);

    let adjustment = match differentials.len() {
        3 => 2.0,
        4 | 6 => 1.0,
        _ => 0.0,
    };
    round_half_up_1dp(index - adjustment)
}

/// Lowest index posted by an earlier approved round within the look-back
/// window ending at the current round's tee time.
///
/// `None` when no earlier round qualifies; caps don't apply without one.
#[must_use]
pub fn calculate_low_handicap_index(
    rounds: &[ProcessedRound],
    current_round_index: usize,
    window_days: i64,
) -> Option<f64> {
    let current = rounds.get(current_round_index)?;
    let window_start = current.tee_time - Duration::days(window_days);
    rounds[..current_round_index]
        .iter()
        .filter(|r| r.approval_status == ApprovalStatus::Approved)
        .filter(|r| r.tee_time >= window_start && r.tee_time <= current.tee_time)
        .map(|r| r.updated_handicap_index)
        .min_by(f64::total_cmp)
}

/// Soft and hard caps with the default thresholds.
#[must_use]
pub fn apply_handicap_caps(new_index: f64, low_handicap_index: Option<f64>) -> f64 {
    apply_handicap_caps_with(
        new_index,
        low_handicap_index,
        SOFT_CAP_THRESHOLD,
        HARD_CAP_THRESHOLD,
    )
}

/// Limit how far `new_index` may rise above the low handicap index.
///
/// Above the soft threshold only half of the excess counts; the hard
/// threshold is an absolute ceiling. Decreases are never capped.
#[must_use]
pub fn apply_handicap_caps_with(
    new_index: f64,
    low_handicap_index: Option<f64>,
    soft_cap: f64,
    hard_cap: f64,
) -> f64 {
    let Some(low) = low_handicap_index else {
        return new_index;
    };
    let difference = new_index - low;
    if difference <= 0.0 {
        return new_index;
    }

    let capped = if difference > soft_cap {
        low + soft_cap + (difference - soft_cap) * SOFT_CAP_DAMPING
    } else {
        new_index
    };
    round_half_up_1dp(capped.min(low + hard_cap))
}

/// Caps using the thresholds of an engine config.
#[must_use]
pub fn apply_configured_caps(
    new_index: f64,
    low_handicap_index: Option<f64>,
    config: &EngineConfig,
) -> f64 {
    apply_handicap_caps_with(
        new_index,
        low_handicap_index,
        config.soft_cap_threshold,
        config.hard_cap_threshold,
    )
}
