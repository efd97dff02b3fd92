//! Score differentials, including the 18-hole equivalent of a 9-hole round.

use crate::config::SLOPE_BASELINE;
use crate::handicap::rounding::{round_half_up, round_toward_zero_1dp};

/// `(AGS - rating) * 113 / slope`, rounded to one decimal with negative
/// values rounded toward zero.
#[must_use]
pub fn calculate_score_differential(
    adjusted_gross_score: f64,
    course_rating: f64,
    slope_rating: f64,
) -> f64 {
    round_toward_zero_1dp((adjusted_gross_score - course_rating) * (SLOPE_BASELINE / slope_rating))
}

/// Differential the player would be expected to post over the unplayed nine.
///
/// Left unrounded; it is only ever combined with a played differential.
#[must_use]
pub fn calculate_expected_9_hole_differential(
    handicap_index: f64,
    nine_hole_course_rating: f64,
    nine_hole_slope_rating: f64,
    nine_hole_par: i32,
) -> f64 {
    let nine_hole_course_handicap = round_half_up(
        (handicap_index / 2.0) * (nine_hole_slope_rating / SLOPE_BASELINE)
            + (nine_hole_course_rating - f64::from(nine_hole_par)),
    );
    let expected_score = f64::from(nine_hole_par + nine_hole_course_handicap);
    (expected_score - nine_hole_course_rating) * (SLOPE_BASELINE / nine_hole_slope_rating)
}

/// 18-hole equivalent differential of a 9-hole round: the played nine's
/// differential plus the expected differential for the other nine.
#[must_use]
pub fn calculate_9_hole_score_differential(
    adjusted_played_score: f64,
    nine_hole_course_rating: f64,
    nine_hole_slope_rating: f64,
    expected_nine_hole_differential: f64,
) -> f64 {
    let played_differential = (adjusted_played_score - nine_hole_course_rating)
        * (SLOPE_BASELINE / nine_hole_slope_rating);
    round_toward_zero_1dp(played_differential + expected_nine_hole_differential)
}
