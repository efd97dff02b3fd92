//! The full recalculation of one user's handicap history.
//!
//! Three passes run over a working array that lives only for one call:
//!
//! 1. adjusted scores and course handicap per round,
//! 2. raw differentials with a provisional rolling index, flagging
//!    exceptional scores and bumping the ESR offset of the trailing window,
//! 3. final differentials (raw minus ESR offset), the chained index and caps.
//!
//! Pass 2's rolling index is only used to detect exceptional rounds. The
//! index that gets persisted is the one chained in pass 3.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::HandicapError;
use crate::handicap::adjustment::{
    add_hcp_strokes_to_scores, calculate_adjusted_gross_score, calculate_adjusted_played_score,
    calculate_course_handicap_with,
};
use crate::handicap::differential::{
    calculate_9_hole_score_differential, calculate_expected_9_hole_differential,
    calculate_score_differential,
};
use crate::handicap::index::{
    apply_configured_caps, calculate_handicap_index_with, calculate_low_handicap_index,
};
use crate::handicap::rounding::round_half_up_1dp;
use crate::model::{
    ApprovalStatus, HandicapOutcome, Hole, RatingPair, RoundRecord, RoundUpdate, Score, Tee,
    UserSnapshot, validate_snapshot,
};

const NINE_HOLES: usize = 9;

/// Working record for one round during a recalculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRound {
    pub id: i64,
    pub tee_time: DateTime<Utc>,
    pub tee_id: i64,
    pub approval_status: ApprovalStatus,
    pub holes_played: usize,
    pub existing_handicap_index: f64,
    pub raw_differential: f64,
    pub esr_offset: f64,
    pub final_differential: f64,
    pub updated_handicap_index: f64,
    pub adjusted_gross_score: i32,
    pub adjusted_played_score: i32,
    pub course_handicap: i32,
}

impl ProcessedRound {
    #[must_use]
    pub fn new(record: &RoundRecord, placeholder_index: f64) -> Self {
        Self {
            id: record.id,
            tee_time: record.tee_time,
            tee_id: record.tee_id,
            approval_status: record.approval_status,
            holes_played: 0,
            existing_handicap_index: placeholder_index,
            raw_differential: 0.0,
            esr_offset: 0.0,
            final_differential: 0.0,
            updated_handicap_index: 0.0,
            adjusted_gross_score: 0,
            adjusted_played_score: 0,
            course_handicap: 0,
        }
    }

    #[must_use]
    pub fn to_update(&self) -> RoundUpdate {
        RoundUpdate {
            id: self.id,
            existing_handicap_index: self.existing_handicap_index,
            score_differential: self.final_differential,
            updated_handicap_index: self.updated_handicap_index,
            exceptional_score_adjustment: self.esr_offset,
            adjusted_gross_score: self.adjusted_gross_score,
            course_handicap: self.course_handicap,
            adjusted_played_score: self.adjusted_played_score,
        }
    }
}

/// Everything a round references, looked up once before the passes run.
struct ResolvedRound<'a> {
    tee: &'a Tee,
    holes: &'a [Hole],
    scores: Vec<Score>,
    rating: RatingPair,
}

#[derive(Debug, Clone, Default)]
pub struct HandicapEngine {
    config: EngineConfig,
}

impl HandicapEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recalculate every approved round of a user from scratch.
    ///
    /// A user without approved rounds gets the maximum index and no round
    /// updates.
    ///
    /// # Errors
    /// Returns the first validation or missing-reference error; nothing is
    /// computed for the user in that case.
    pub fn calculate(&self, snapshot: &UserSnapshot) -> Result<HandicapOutcome, HandicapError> {
        validate_snapshot(snapshot, &self.config)?;

        let initial_index = snapshot
            .initial_handicap_index
            .unwrap_or(self.config.max_score_differential);

        let mut records: Vec<&RoundRecord> = snapshot
            .rounds
            .iter()
            .filter(|r| r.approval_status == ApprovalStatus::Approved)
            .collect();
        records.sort_by(|a, b| a.tee_time.cmp(&b.tee_time).then_with(|| a.id.cmp(&b.id)));

        if records.is_empty() {
            debug!(user_id = %snapshot.user_id, "no approved rounds");
            return Ok(HandicapOutcome {
                user_id: snapshot.user_id.clone(),
                handicap_index: self.config.max_score_differential,
                round_updates: vec![],
            });
        }

        let tees = snapshot.tees_by_id();
        let holes = snapshot.holes_by_tee();
        let mut scores = snapshot.scores_by_round();
        let resolved = records
            .iter()
            .map(|record| resolve_round(record, &tees, &holes, &mut scores))
            .collect::<Result<Vec<_>, _>>()?;

        let mut processed: Vec<ProcessedRound> = records
            .iter()
            .map(|record| ProcessedRound::new(record, self.config.max_score_differential))
            .collect();

        let resolved = self.adjust_scores(&mut processed, resolved)?;
        self.detect_exceptional_scores(&mut processed, &resolved, initial_index);
        self.finalize_indexes(&mut processed, initial_index);

        let handicap_index = processed
            .last()
            .map_or(self.config.max_score_differential, |r| r.updated_handicap_index);
        debug!(
            user_id = %snapshot.user_id,
            rounds = processed.len(),
            handicap_index,
            "recalculated handicap"
        );

        Ok(HandicapOutcome {
            user_id: snapshot.user_id.clone(),
            handicap_index,
            round_updates: processed.iter().map(ProcessedRound::to_update).collect(),
        })
    }

    /// Pass 1: course handicap, stroke allocation and adjusted scores.
    ///
    /// The course handicap uses the placeholder index the working record was
    /// seeded with.
    fn adjust_scores<'a>(
        &self,
        processed: &mut [ProcessedRound],
        resolved: Vec<ResolvedRound<'a>>,
    ) -> Result<Vec<ResolvedRound<'a>>, HandicapError> {
        let mut adjusted = Vec::with_capacity(resolved.len());
        for (i, round) in resolved.into_iter().enumerate() {
            let tee_time = processed[i].tee_time;
            let prior_rounds = processed[..i]
                .iter()
                .filter(|r| r.tee_time < tee_time)
                .count();
            let has_established_handicap =
                prior_rounds >= self.config.established_handicap_min_rounds;

            let pr = &mut processed[i];
            let holes_played = round.scores.len();
            let par = if holes_played == NINE_HOLES {
                round.tee.out_par
            } else {
                round.tee.total_par
            };
            let course_handicap = calculate_course_handicap_with(
                pr.existing_handicap_index,
                round.rating,
                par,
                holes_played,
            );
            let scores =
                add_hcp_strokes_to_scores(round.holes, round.scores, course_handicap, holes_played)?;
            let adjusted_played_score =
                calculate_adjusted_played_score(round.holes, &scores, has_established_handicap);
            let adjusted_gross_score = calculate_adjusted_gross_score(
                adjusted_played_score,
                course_handicap,
                holes_played,
                round.holes,
                &scores,
            );

            pr.holes_played = holes_played;
            pr.course_handicap = course_handicap;
            pr.adjusted_played_score = adjusted_played_score;
            pr.adjusted_gross_score = adjusted_gross_score;
            adjusted.push(ResolvedRound {
                tee: round.tee,
                holes: round.holes,
                scores,
                rating: round.rating,
            });
        }
        Ok(adjusted)
    }

    /// Pass 2: raw differentials, provisional index and ESR detection.
    fn detect_exceptional_scores(
        &self,
        processed: &mut [ProcessedRound],
        resolved: &[ResolvedRound<'_>],
        initial_index: f64,
    ) {
        let window = self.config.esr_window_size.max(1);
        let mut rolling_index = initial_index;
        for i in 0..processed.len() {
            processed[i].existing_handicap_index = rolling_index;
            processed[i].raw_differential =
                raw_differential(&processed[i], &resolved[i], rolling_index);

            let start = i.saturating_sub(window - 1);
            let differentials: Vec<f64> = processed[start..=i]
                .iter()
                .map(|r| r.raw_differential)
                .collect();
            processed[i].updated_handicap_index =
                calculate_handicap_index_with(&differentials, self.config.max_score_differential);

            let difference = rolling_index - processed[i].raw_differential;
            if difference >= self.config.exceptional_round_threshold {
                let offset = if difference >= self.config.exceptional_round_major_threshold {
                    2.0
                } else {
                    1.0
                };
                debug!(
                    round_id = processed[i].id,
                    difference, offset, "exceptional score reduction"
                );
                for pr in &mut processed[start..=i] {
                    pr.esr_offset += offset;
                }
            }

            rolling_index = processed[i].updated_handicap_index;
        }
    }

    /// Pass 3: final differentials, chained index, low-index caps.
    fn finalize_indexes(&self, processed: &mut [ProcessedRound], initial_index: f64) {
        let window = self.config.esr_window_size.max(1);
        let caps_engaged = processed.len() >= self.config.caps_min_rounds;
        for i in 0..processed.len() {
            processed[i].existing_handicap_index = if i == 0 {
                initial_index
            } else {
                processed[i - 1].updated_handicap_index
            };
            processed[i].final_differential =
                round_half_up_1dp(processed[i].raw_differential - processed[i].esr_offset);

            let start = i.saturating_sub(window - 1);
            let differentials: Vec<f64> = processed[start..=i]
                .iter()
                .map(|r| r.final_differential)
                .collect();
            let calculated =
                calculate_handicap_index_with(&differentials, self.config.max_score_differential);

            let updated = if caps_engaged {
                let low = calculate_low_handicap_index(
                    processed,
                    i,
                    self.config.low_handicap_window_days,
                );
                apply_configured_caps(calculated, low, &self.config)
            } else {
                calculated
            };
            processed[i].updated_handicap_index = updated.min(self.config.max_score_differential);
        }
    }
}

/// Recalculate one user with the given thresholds.
///
/// # Errors
/// See [`HandicapEngine::calculate`].
pub fn calculate_user_handicap(
    snapshot: &UserSnapshot,
    config: &EngineConfig,
) -> Result<HandicapOutcome, HandicapError> {
    HandicapEngine::new(config.clone()).calculate(snapshot)
}

fn resolve_round<'a>(
    record: &RoundRecord,
    tees: &HashMap<i64, &'a Tee>,
    holes: &'a HashMap<i64, Vec<Hole>>,
    scores: &mut HashMap<i64, Vec<Score>>,
) -> Result<ResolvedRound<'a>, HandicapError> {
    let tee = *tees.get(&record.tee_id).ok_or(HandicapError::TeeNotFound {
        round_id: record.id,
        tee_id: record.tee_id,
    })?;
    let round_scores = scores
        .remove(&record.id)
        .filter(|s| !s.is_empty())
        .ok_or(HandicapError::ScoresNotFound {
            round_id: record.id,
        })?;
    let tee_holes = holes
        .get(&record.tee_id)
        .filter(|h| !h.is_empty())
        .ok_or(HandicapError::HolesNotFound {
            tee_id: record.tee_id,
        })?;
    let rating = record.locked_rating.unwrap_or_else(|| {
        if round_scores.len() == NINE_HOLES {
            tee.rating_front9()
        } else {
            tee.rating_18()
        }
    });
    Ok(ResolvedRound {
        tee,
        holes: tee_holes.as_slice(),
        scores: round_scores,
        rating,
    })
}

fn raw_differential(pr: &ProcessedRound, round: &ResolvedRound<'_>, existing_index: f64) -> f64 {
    let RatingPair {
        course_rating,
        slope_rating,
    } = round.rating;
    if pr.holes_played == NINE_HOLES {
        let expected = calculate_expected_9_hole_differential(
            existing_index,
            course_rating,
            slope_rating,
            round.tee.out_par,
        );
        calculate_9_hole_score_differential(
            f64::from(pr.adjusted_played_score),
            course_rating,
            slope_rating,
            expected,
        )
    } else {
        calculate_score_differential(f64::from(pr.adjusted_gross_score), course_rating, slope_rating)
    }
}
