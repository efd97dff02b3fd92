use std::collections::{BTreeMap, HashSet};

use crate::config::{
    EngineConfig, HOLES_PER_TEE, MAX_HOLE_STROKES, MAX_SLOPE_RATING, MIN_SLOPE_RATING,
};
use crate::error::HandicapError;
use crate::model::snapshot::UserSnapshot;
use crate::model::types::{Hole, RatingPair, RoundRecord, Score, Tee};

fn check_range<T>(
    entity: &'static str,
    id: i64,
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<(), HandicapError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(HandicapError::validation(
            entity,
            format!("{entity} {id}: {field} {value} is outside {min}..={max}"),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Will return `Err` if a hole field is outside its allowed range
pub fn validate_hole(hole: &Hole) -> Result<(), HandicapError> {
    check_range("hole", hole.id, "holeNumber", hole.hole_number, 1, 18)?;
    check_range("hole", hole.id, "par", hole.par, 1, 5)?;
    check_range("hole", hole.id, "hcp", hole.hcp, 1, 18)?;
    check_range("hole", hole.id, "distance", hole.distance, 1, 700)?;
    Ok(())
}

/// # Errors
///
/// Will return `Err` if a rating, slope, par or distance is out of range, or
/// the totals don't add up
pub fn validate_tee(tee: &Tee) -> Result<(), HandicapError> {
    let id = tee.id;
    for (field, value, min, max) in [
        ("courseRating18", tee.course_rating_18, 40.0, 90.0),
        ("slopeRating18", tee.slope_rating_18, MIN_SLOPE_RATING, MAX_SLOPE_RATING),
        ("courseRatingFront9", tee.course_rating_front9, 20.0, 45.0),
        ("slopeRatingFront9", tee.slope_rating_front9, MIN_SLOPE_RATING, MAX_SLOPE_RATING),
        ("courseRatingBack9", tee.course_rating_back9, 20.0, 45.0),
        ("slopeRatingBack9", tee.slope_rating_back9, MIN_SLOPE_RATING, MAX_SLOPE_RATING),
    ] {
        if !value.is_finite() {
            return Err(HandicapError::validation(
                "tee",
                format!("tee {id}: {field} is not a finite number"),
            ));
        }
        check_range("tee", id, field, value, min, max)?;
    }
    check_range("tee", id, "outPar", tee.out_par, 27, 40)?;
    check_range("tee", id, "inPar", tee.in_par, 27, 40)?;
    check_range("tee", id, "totalPar", tee.total_par, 54, 80)?;
    if tee.out_par + tee.in_par != tee.total_par {
        return Err(HandicapError::validation(
            "tee",
            format!("tee {id}: totalPar must equal outPar + inPar"),
        ));
    }
    if tee.out_distance + tee.in_distance != tee.total_distance {
        return Err(HandicapError::validation(
            "tee",
            format!("tee {id}: totalDistance must equal outDistance + inDistance"),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Will return `Err` if strokes are negative or above 99
pub fn validate_score(score: &Score) -> Result<(), HandicapError> {
    if score.strokes < 0 || score.strokes > MAX_HOLE_STROKES {
        return Err(HandicapError::validation(
            "score",
            format!(
                "round {} hole {}: strokes {} is outside 0..={MAX_HOLE_STROKES}",
                score.round_id, score.hole_id, score.strokes
            ),
        ));
    }
    Ok(())
}

fn validate_locked_rating(round: &RoundRecord, rating: &RatingPair) -> Result<(), HandicapError> {
    if !rating.course_rating.is_finite() || !rating.slope_rating.is_finite() {
        return Err(HandicapError::validation(
            "round",
            format!("round {}: locked rating is not a finite number", round.id),
        ));
    }
    check_range(
        "round",
        round.id,
        "lockedRating.slopeRating",
        rating.slope_rating,
        MIN_SLOPE_RATING,
        MAX_SLOPE_RATING,
    )
}

/// Every tee that has holes must have exactly one hole for each number
/// from 1 to 18. A tee with no holes at all is reported by the engine as
/// `HolesNotFound` when a round needs it.
///
/// # Errors
///
/// Will return `Err` if a tee's holes are short, duplicated or misnumbered
pub fn validate_tee_holes(holes: &[Hole]) -> Result<(), HandicapError> {
    let mut by_tee: BTreeMap<i64, Vec<i32>> = BTreeMap::new();
    for hole in holes {
        by_tee.entry(hole.tee_id).or_default().push(hole.hole_number);
    }
    for (tee_id, mut numbers) in by_tee {
        if numbers.len() != HOLES_PER_TEE {
            return Err(HandicapError::validation(
                "tee",
                format!(
                    "tee {tee_id} has {} holes, expected {HOLES_PER_TEE}",
                    numbers.len()
                ),
            ));
        }
        numbers.sort_unstable();
        if numbers.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(HandicapError::validation(
                "tee",
                format!("tee {tee_id} has more than one hole with the same holeNumber"),
            ));
        }
    }
    Ok(())
}

/// Validate a whole snapshot before any calculation runs.
///
/// The batch is rejected on the first violation rather than skipping records,
/// since a silently dropped round would shift every later round's index.
///
/// # Errors
///
/// Will return `Err` naming the first malformed record
pub fn validate_snapshot(
    snapshot: &UserSnapshot,
    config: &EngineConfig,
) -> Result<(), HandicapError> {
    if let Some(initial) = snapshot.initial_handicap_index {
        if !initial.is_finite() || initial > config.max_score_differential {
            return Err(HandicapError::validation(
                "profile",
                format!(
                    "user {}: initialHandicapIndex {initial} must be finite and at most {}",
                    snapshot.user_id, config.max_score_differential
                ),
            ));
        }
    }

    let mut round_ids = HashSet::new();
    for round in &snapshot.rounds {
        if !round_ids.insert(round.id) {
            return Err(HandicapError::validation(
                "round",
                format!("round {} appears more than once", round.id),
            ));
        }
        if let Some(rating) = round.locked_rating.as_ref() {
            validate_locked_rating(round, rating)?;
        }
    }

    for tee in &snapshot.tees {
        validate_tee(tee)?;
    }
    for hole in &snapshot.holes {
        validate_hole(hole)?;
    }
    validate_tee_holes(&snapshot.holes)?;

    let mut seen = HashSet::new();
    for score in &snapshot.scores {
        validate_score(score)?;
        if !seen.insert((score.round_id, score.hole_id)) {
            return Err(HandicapError::validation(
                "score",
                format!(
                    "round {} has more than one score for hole {}",
                    score.round_id, score.hole_id
                ),
            ));
        }
    }
    for (round_id, scores) in snapshot.scores_by_round() {
        if scores.len() > HOLES_PER_TEE {
            return Err(HandicapError::validation(
                "score",
                format!("round {round_id} has {} scores, more than {HOLES_PER_TEE}", scores.len()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole() -> Hole {
        Hole {
            id: 10,
            tee_id: 1,
            hole_number: 3,
            par: 4,
            hcp: 11,
            distance: 402,
        }
    }

    #[test]
    fn hole_ranges() {
        assert!(validate_hole(&hole()).is_ok());
        let mut bad = hole();
        bad.par = 6;
        let err = validate_hole(&bad).unwrap_err();
        assert_eq!(err.to_string(), "invalid hole: hole 10: par 6 is outside 1..=5");
        bad.par = 4;
        bad.distance = 0;
        assert!(validate_hole(&bad).is_err());
    }

    #[test]
    fn score_strokes_range() {
        let mut score = Score {
            round_id: 1,
            hole_id: 10,
            strokes: 0,
            hcp_strokes: 0,
        };
        assert!(validate_score(&score).is_ok());
        score.strokes = 99;
        assert!(validate_score(&score).is_ok());
        score.strokes = -1;
        assert!(validate_score(&score).is_err());
    }

    fn full_tee(tee_id: i64) -> Vec<Hole> {
        (1..=18)
            .map(|n| Hole {
                id: tee_id * 100 + i64::from(n),
                tee_id,
                hole_number: n,
                par: 4,
                hcp: n,
                distance: 380,
            })
            .collect()
    }

    #[test]
    fn tees_need_all_eighteen_holes() {
        let mut holes = full_tee(1);
        holes.extend(full_tee(2));
        assert!(validate_tee_holes(&holes).is_ok());
        assert!(validate_tee_holes(&[]).is_ok());

        let short: Vec<Hole> = full_tee(1).into_iter().take(17).collect();
        let err = validate_tee_holes(&short).unwrap_err();
        assert_eq!(err.to_string(), "invalid tee: tee 1 has 17 holes, expected 18");

        let mut repeated = full_tee(2);
        repeated[17].hole_number = 1;
        assert!(validate_tee_holes(&repeated).is_err());
    }
}
