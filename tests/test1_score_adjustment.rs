mod common;

use common::{hole_id, holes, scores, tee};
use rusty_handicap::error::HandicapError;
use rusty_handicap::handicap::{
    add_hcp_strokes_to_scores, calculate_adjusted_gross_score, calculate_adjusted_played_score,
    calculate_course_handicap, calculate_course_handicap_with, calculate_hole_adjusted_score,
};
use rusty_handicap::model::{RatingPair, Score};

fn score_on(hole_number: i32, strokes: i32, hcp_strokes: i32) -> Score {
    Score {
        round_id: 1,
        hole_id: hole_id(hole_number),
        strokes,
        hcp_strokes,
    }
}

#[test]
fn unestablished_players_are_capped_at_par_plus_five() {
    let holes = holes();
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 11, 1), false), 9);
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 9, 1), false), 9);
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 5, 1), false), 5);
}

#[test]
fn established_players_are_capped_at_net_double_bogey() {
    let holes = holes();
    // par 4 + 2 + 1 stroke received
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 11, 1), true), 7);
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 11, 0), true), 6);
    // four strokes received would allow 10; par + 5 still applies
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 11, 4), true), 9);
    assert_eq!(calculate_hole_adjusted_score(&holes[0], &score_on(1, 3, 0), true), 3);
}

#[test]
fn adjusted_played_score_skips_unplayed_holes() {
    let holes = holes();
    let played = vec![score_on(1, 12, 0), score_on(2, 4, 0), score_on(3, 3, 0)];
    assert_eq!(calculate_adjusted_played_score(&holes, &played, false), 16);
    assert_eq!(calculate_adjusted_played_score(&holes, &played, true), 13);
    assert_eq!(calculate_adjusted_played_score(&holes, &[], true), 0);
}

#[test]
fn adjusted_played_score_never_exceeds_strokes() {
    let holes = holes();
    let card: Vec<i32> = (0..18).map(|n| 2 + n % 9).collect();
    let played = scores(1, &card);
    let total: i32 = card.iter().sum();
    for established in [false, true] {
        assert!(calculate_adjusted_played_score(&holes, &played, established) <= total);
    }
}

#[test]
fn course_handicap_for_eighteen_and_nine_holes() {
    let tee = tee();
    assert_eq!(calculate_course_handicap(15.0, &tee, 18), 17);
    // half of 15.0 is not rounded before use: 7.5 * 128 / 113 = 8.496
    assert_eq!(calculate_course_handicap(15.0, &tee, 9), 8);
    assert_eq!(calculate_course_handicap(54.0, &tee, 18), 62);
    assert_eq!(calculate_course_handicap(-3.0, &tee, 18), -3);
    assert_eq!(calculate_course_handicap(0.0, &tee, 18), 0);
}

#[test]
fn course_handicap_against_an_explicit_rating() {
    let neutral = RatingPair {
        course_rating: 70.0,
        slope_rating: 113.0,
    };
    assert_eq!(calculate_course_handicap_with(15.0, neutral, 72, 18), 13);
    assert_eq!(calculate_course_handicap_with(15.0, neutral, 72, 13), 13);
    let front = RatingPair {
        course_rating: 35.0,
        slope_rating: 113.0,
    };
    // 7.5 - 1 rounds half up
    assert_eq!(calculate_course_handicap_with(15.0, front, 36, 9), 7);

    let tee = tee();
    assert_eq!(
        calculate_course_handicap_with(15.0, tee.rating_front9(), tee.out_par, 9),
        calculate_course_handicap(15.0, &tee, 9)
    );
}

#[test]
fn strokes_follow_play_order() -> Result<(), HandicapError> {
    let holes = holes();
    let card = vec![4; 18];
    let stroked = add_hcp_strokes_to_scores(&holes, scores(1, &card), 20, 18)?;
    let strokes: Vec<i32> = stroked.iter().map(|s| s.hcp_strokes).collect();
    let mut expected = vec![2, 2];
    expected.resize(18, 1);
    assert_eq!(strokes, expected);
    assert_eq!(strokes.iter().sum::<i32>(), 20);
    Ok(())
}

#[test]
fn scores_come_back_in_hole_order() -> Result<(), HandicapError> {
    let holes = holes();
    let mut played = scores(1, &[4; 9]);
    played.reverse();
    let stroked = add_hcp_strokes_to_scores(&holes, played, 12, 9)?;
    let hole_ids: Vec<i64> = stroked.iter().map(|s| s.hole_id).collect();
    assert_eq!(hole_ids, (1..=9).map(hole_id).collect::<Vec<_>>());
    let strokes: Vec<i32> = stroked.iter().map(|s| s.hcp_strokes).collect();
    assert_eq!(strokes, vec![2, 2, 2, 1, 1, 1, 1, 1, 1]);
    Ok(())
}

#[test]
fn plus_handicaps_receive_no_strokes() -> Result<(), HandicapError> {
    let holes = holes();
    let mut played = scores(1, &[4; 18]);
    for s in &mut played {
        s.hcp_strokes = 3;
    }
    let stroked = add_hcp_strokes_to_scores(&holes, played, -4, 18)?;
    assert!(stroked.iter().all(|s| s.hcp_strokes == 0));
    Ok(())
}

#[test]
fn non_contiguous_holes_get_strokes_in_hole_order() -> Result<(), HandicapError> {
    let holes = holes();
    let played: Vec<Score> = (1..=9)
        .chain([11, 13])
        .map(|n| score_on(n, 5, 0))
        .collect();
    let stroked = add_hcp_strokes_to_scores(&holes, played, 17, 11)?;
    let strokes: Vec<i32> = stroked.iter().map(|s| s.hcp_strokes).collect();
    assert_eq!(strokes, vec![2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1]);
    Ok(())
}

#[test]
fn unknown_hole_is_reported() {
    let holes = holes();
    let played = vec![score_on(1, 4, 0), Score {
        round_id: 7,
        hole_id: 999,
        strokes: 4,
        hcp_strokes: 0,
    }];
    let err = add_hcp_strokes_to_scores(&holes, played, 10, 2).unwrap_err();
    assert_eq!(
        err,
        HandicapError::HoleNotFound {
            round_id: 7,
            hole_id: 999
        }
    );
    assert_eq!(err.to_string(), "hole 999 not found for score in round 7");
}

#[test]
fn eighteen_hole_gross_equals_played_score() {
    let holes = holes();
    let played = scores(1, &[5; 18]);
    assert_eq!(calculate_adjusted_gross_score(90, 17, 18, &holes, &played), 90);
}

#[test]
fn nine_hole_gross_adds_par_and_strokes_for_back_nine() {
    let holes = holes();
    let played = scores(1, &[5; 9]);
    // 45 + round(10 / 18 * 9) + 9 * par 4
    assert_eq!(calculate_adjusted_gross_score(45, 10, 9, &holes, &played), 86);
}

#[test]
fn gross_for_non_contiguous_round_matches_holes_by_id() {
    let mut holes = holes();
    holes[9].par = 5;
    let played: Vec<Score> = (1..=9)
        .chain([11, 13])
        .map(|n| score_on(n, 5, 0))
        .collect();
    // unplayed: 10 (par 5), 12, 14..=18 -> 29; round(14 / 18 * 7) = 5
    assert_eq!(calculate_adjusted_gross_score(50, 14, 11, &holes, &played), 84);
}
