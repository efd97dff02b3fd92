use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::types::{Hole, RoundRecord, Score, Tee};

/// Everything the engine needs for one user, read once in bulk by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub user_id: String,
    #[serde(default)]
    pub initial_handicap_index: Option<f64>,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
    #[serde(default)]
    pub tees: Vec<Tee>,
    #[serde(default)]
    pub holes: Vec<Hole>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl UserSnapshot {
    #[must_use]
    pub fn tees_by_id(&self) -> HashMap<i64, &Tee> {
        self.tees.iter().map(|tee| (tee.id, tee)).collect()
    }

    /// Holes grouped per tee, each group in hole-number order.
    #[must_use]
    pub fn holes_by_tee(&self) -> HashMap<i64, Vec<Hole>> {
        let mut map: HashMap<i64, Vec<Hole>> = HashMap::new();
        for hole in &self.holes {
            map.entry(hole.tee_id).or_default().push(hole.clone());
        }
        for holes in map.values_mut() {
            holes.sort_by_key(|h| (h.hole_number, h.id));
        }
        map
    }

    #[must_use]
    pub fn scores_by_round(&self) -> HashMap<i64, Vec<Score>> {
        let mut map: HashMap<i64, Vec<Score>> = HashMap::new();
        for score in &self.scores {
            map.entry(score.round_id).or_default().push(score.clone());
        }
        map
    }
}

/// Computed fields for one round, ready to be persisted by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundUpdate {
    pub id: i64,
    pub existing_handicap_index: f64,
    pub score_differential: f64,
    pub updated_handicap_index: f64,
    pub exceptional_score_adjustment: f64,
    pub adjusted_gross_score: i32,
    pub course_handicap: i32,
    pub adjusted_played_score: i32,
}

/// Result of a full recalculation for one user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandicapOutcome {
    pub user_id: String,
    pub handicap_index: f64,
    pub round_updates: Vec<RoundUpdate>,
}
