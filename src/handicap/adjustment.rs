//! Per-hole maximum score capping, course handicap and adjusted scores.

use crate::config::SLOPE_BASELINE;
use crate::error::HandicapError;
use crate::handicap::rounding::round_half_up;
use crate::model::{Hole, RatingPair, Score, Tee};
const FULL_ROUND_HOLES: usize = 18;
const NINE_HOLES: usize = 9;

/// Maximum hole score for handicap purposes.
///
/// Without an established handicap the ceiling is par + 5. With one it is net
/// double bogey (par + 2 + strokes received), itself never above par + 5.
#[must_use]
pub fn calculate_hole_adjusted_score(
    hole: &Hole,
    score: &Score,
    has_established_handicap: bool,
) -> i32 {
    let par_plus_five = hole.par + 5;
    if !has_established_handicap {
        return score.strokes.min(par_plus_five);
    }
    let net_double_bogey = hole.par + 2 + score.hcp_strokes;
    score.strokes.min(par_plus_five.min(net_double_bogey))
}

/// Sum of capped hole scores. Holes without a score contribute nothing.
#[must_use]
pub fn calculate_adjusted_played_score(
    holes: &[Hole],
    scores: &[Score],
    has_established_handicap: bool,
) -> i32 {
    holes
        .iter()
        .filter_map(|hole| {
            scores
                .iter()
                .find(|s| s.hole_id == hole.id)
                .map(|score| calculate_hole_adjusted_score(hole, score, has_established_handicap))
        })
        .sum()
}

/// Strokes a player receives on this tee for the given number of holes.
///
/// Nine-hole rounds halve the index (without rounding the half) and use the
/// front-nine rating; anything else uses the 18-hole rating.
#[must_use]
pub fn calculate_course_handicap(handicap_index: f64, tee: &Tee, holes_played: usize) -> i32 {
    if holes_played == NINE_HOLES {
        calculate_course_handicap_with(
            handicap_index,
            tee.rating_front9(),
            tee.out_par,
            holes_played,
        )
    } else {
        calculate_course_handicap_with(handicap_index, tee.rating_18(), tee.total_par, holes_played)
    }
}

/// Course handicap against an explicit rating, such as one locked on a round.
/// `par` is the par of the rated holes (out par for nine, total par otherwise).
#[must_use]
pub fn calculate_course_handicap_with(
    handicap_index: f64,
    rating: RatingPair,
    par: i32,
    holes_played: usize,
) -> i32 {
    let index = if holes_played == NINE_HOLES {
        handicap_index / 2.0
    } else {
        handicap_index
    };
    round_half_up(
        index * (rating.slope_rating / SLOPE_BASELINE) + (rating.course_rating - f64::from(par)),
    )
}

/// Spread the course handicap over the played holes.
///
/// Every played hole gets `ch / n` strokes and the first `ch % n` holes in
/// play order (hole number) get one more. A negative course handicap gives
/// no strokes at all.
///
/// # Errors
/// Returns `HoleNotFound` if a score references a hole outside `holes`.
pub fn add_hcp_strokes_to_scores(
    holes: &[Hole],
    scores: Vec<Score>,
    course_handicap: i32,
    holes_played: usize,
) -> Result<Vec<Score>, HandicapError> {
    let mut keyed = Vec::with_capacity(scores.len());
    for score in scores {
        let hole = holes
            .iter()
            .find(|h| h.id == score.hole_id)
            .ok_or(HandicapError::HoleNotFound {
                round_id: score.round_id,
                hole_id: score.hole_id,
            })?;
        keyed.push((hole.hole_number, score));
    }
    keyed.sort_by_key(|(hole_number, score)| (*hole_number, score.hole_id));

    if holes_played == 0 {
        return Ok(keyed.into_iter().map(|(_, s)| s).collect());
    }

    let strokes = usize::try_from(course_handicap.max(0)).unwrap_or(0);
    let full_division = strokes / holes_played;
    let remainder = strokes % holes_played;

    Ok(keyed
        .into_iter()
        .enumerate()
        .map(|(position, (_, mut score))| {
            let extra = usize::from(position < remainder);
            score.hcp_strokes = i32::try_from(full_division + extra).unwrap_or(i32::MAX);
            score
        })
        .collect())
}

/// Extrapolate a partial round to an 18-hole adjusted gross score.
///
/// Unplayed holes count as par plus their share of the course handicap.
/// Holes are matched by id, so non-contiguous play (1-9, 11 and 13) works.
#[must_use]
pub fn calculate_adjusted_gross_score(
    adjusted_played_score: i32,
    course_handicap: i32,
    holes_played: usize,
    holes: &[Hole],
    scores: &[Score],
) -> i32 {
    if holes_played == FULL_ROUND_HOLES {
        return adjusted_played_score;
    }
    let holes_left = FULL_ROUND_HOLES.saturating_sub(holes_played) as f64;
    let predicted_strokes =
        round_half_up(f64::from(course_handicap) / FULL_ROUND_HOLES as f64 * holes_left);
    let par_for_remaining_holes: i32 = holes
        .iter()
        .filter(|hole| !scores.iter().any(|s| s.hole_id == hole.id))
        .map(|hole| hole.par)
        .sum();
    adjusted_played_score + predicted_strokes + par_for_remaining_holes
}
