#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use rusty_handicap::model::{
    ApprovalStatus, DistanceMeasurement, Gender, Hole, RoundRecord, Score, Tee, UserSnapshot,
};

pub const TEE_ID: i64 = 1;

/// Par 72 tee rated 72.0 / 130, front nine 36.0 / 128.
pub fn tee() -> Tee {
    Tee {
        id: TEE_ID,
        name: "Blue".to_string(),
        gender: Gender::Mens,
        course_rating_18: 72.0,
        slope_rating_18: 130.0,
        course_rating_front9: 36.0,
        slope_rating_front9: 128.0,
        course_rating_back9: 36.0,
        slope_rating_back9: 132.0,
        out_par: 36,
        in_par: 36,
        total_par: 72,
        out_distance: 3303,
        in_distance: 3303,
        total_distance: 6606,
        distance_measurement: DistanceMeasurement::Yards,
    }
}

/// Eighteen par 4s; hole `n` has id `100 + n` and stroke index `n`.
pub fn holes() -> Vec<Hole> {
    (1..=18)
        .map(|n| Hole {
            id: hole_id(n),
            tee_id: TEE_ID,
            hole_number: n,
            par: 4,
            hcp: n,
            distance: 367,
        })
        .collect()
}

pub fn hole_id(hole_number: i32) -> i64 {
    100 + i64::from(hole_number)
}

pub fn tee_time(day: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid base date");
    base + Duration::days(day)
}

pub fn round(id: i64, day: i64) -> RoundRecord {
    RoundRecord {
        id,
        tee_id: TEE_ID,
        tee_time: tee_time(day),
        approval_status: ApprovalStatus::Approved,
        locked_rating: None,
    }
}

/// Scores for holes 1..=strokes.len() in order.
pub fn scores(round_id: i64, strokes: &[i32]) -> Vec<Score> {
    strokes
        .iter()
        .zip(1..)
        .map(|(&s, hole_number)| Score {
            round_id,
            hole_id: hole_id(hole_number),
            strokes: s,
            hcp_strokes: 0,
        })
        .collect()
}

/// `fives` holes of 5 followed by par 4s, 18 holes in all.
pub fn card(fives: usize) -> Vec<i32> {
    let mut card = vec![5; fives];
    card.resize(18, 4);
    card
}

pub fn empty_snapshot(user_id: &str, initial: Option<f64>) -> UserSnapshot {
    UserSnapshot {
        user_id: user_id.to_string(),
        initial_handicap_index: initial,
        rounds: vec![],
        tees: vec![tee()],
        holes: holes(),
        scores: vec![],
    }
}

/// One approved round per card on consecutive days, ids starting at 1.
pub fn snapshot(user_id: &str, initial: Option<f64>, cards: &[Vec<i32>]) -> UserSnapshot {
    let mut snapshot = empty_snapshot(user_id, initial);
    for (day, card) in (0_i64..).zip(cards) {
        let id = day + 1;
        snapshot.rounds.push(round(id, day));
        snapshot.scores.extend(scores(id, card));
    }
    snapshot
}
