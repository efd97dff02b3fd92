use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A request to recalculate one user's handicap.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueJob {
    pub id: i64,
    pub user_id: String,
    pub event_type: String,
    pub attempts: u32,
    pub status: JobStatus,
    pub error_message: Option<String>,
}

impl QueueJob {
    #[must_use]
    pub fn new(id: i64, user_id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            event_type: event_type.into(),
            attempts: 0,
            status: JobStatus::Pending,
            error_message: None,
        }
    }

    /// Status after one more failed attempt.
    #[must_use]
    pub fn status_after_failure(&self, max_retries: u32) -> (u32, JobStatus) {
        let attempts = self.attempts + 1;
        let status = if attempts >= max_retries {
            JobStatus::Failed
        } else {
            JobStatus::Pending
        };
        (attempts, status)
    }
}

/// Counts for one pass over the queue.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}
