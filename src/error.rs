use thiserror::Error;

/// Fatal conditions raised while recalculating one user's handicap history.
///
/// Any of these aborts the whole batch for that user; the engine never
/// substitutes defaults for missing data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandicapError {
    #[error("tee {tee_id} not found for round {round_id}")]
    TeeNotFound { round_id: i64, tee_id: i64 },
    #[error("holes not found for tee {tee_id}")]
    HolesNotFound { tee_id: i64 },
    #[error("scores not found for round {round_id}")]
    ScoresNotFound { round_id: i64 },
    #[error("hole {hole_id} not found for score in round {round_id}")]
    HoleNotFound { round_id: i64, hole_id: i64 },
    #[error("invalid {entity}: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },
}

impl HandicapError {
    #[must_use]
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            message: message.into(),
        }
    }
}

/// Error surfaced by a persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for StoreError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StoreError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Failure of a single queued user job.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    #[error(transparent)]
    Handicap(#[from] HandicapError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
