use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Mens,
    Ladies,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMeasurement {
    Meters,
    #[default]
    Yards,
}

/// One hole of a tee. `hcp` is the stroke index (allocation order).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
    pub id: i64,
    pub tee_id: i64,
    pub hole_number: i32,
    pub par: i32,
    pub hcp: i32,
    pub distance: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tee {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub gender: Gender,
    pub course_rating_18: f64,
    pub slope_rating_18: f64,
    pub course_rating_front9: f64,
    pub slope_rating_front9: f64,
    pub course_rating_back9: f64,
    pub slope_rating_back9: f64,
    pub out_par: i32,
    pub in_par: i32,
    pub total_par: i32,
    pub out_distance: i32,
    pub in_distance: i32,
    pub total_distance: i32,
    #[serde(default)]
    pub distance_measurement: DistanceMeasurement,
}

/// A course rating and slope rating used together in differential math.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingPair {
    pub course_rating: f64,
    pub slope_rating: f64,
}

impl Tee {
    #[must_use]
    pub fn rating_18(&self) -> RatingPair {
        RatingPair {
            course_rating: self.course_rating_18,
            slope_rating: self.slope_rating_18,
        }
    }

    #[must_use]
    pub fn rating_front9(&self) -> RatingPair {
        RatingPair {
            course_rating: self.course_rating_front9,
            slope_rating: self.slope_rating_front9,
        }
    }
}

/// One hole's result within a round.
///
/// `hcp_strokes` is recomputed by the engine; whatever the caller supplies
/// is overwritten.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub round_id: i64,
    pub hole_id: i64,
    pub strokes: i32,
    #[serde(default)]
    pub hcp_strokes: i32,
}

/// A played round as stored by the caller.
///
/// `locked_rating`, when present, is the rating pair captured at the time of
/// play; it takes precedence over the tee's current values so later tee edits
/// don't rewrite history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub id: i64,
    pub tee_id: i64,
    pub tee_time: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_rating: Option<RatingPair>,
}
