use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::{HandicapOutcome, RoundUpdate, UserSnapshot};
use crate::queue::job::{JobStatus, QueueJob};

/// Persistence seen by the batch runner.
///
/// `commit_outcome` must apply every round update, the user index and the
/// job completion together or not at all.
#[async_trait]
pub trait HandicapStore: Send + Sync {
    async fn pending_jobs(&self, limit: usize) -> Result<Vec<QueueJob>, StoreError>;
    async fn load_snapshot(&self, user_id: &str) -> Result<UserSnapshot, StoreError>;
    async fn commit_outcome(
        &self,
        job_id: i64,
        outcome: &HandicapOutcome,
    ) -> Result<(), StoreError>;
    async fn record_failure(
        &self,
        job_id: i64,
        attempts: u32,
        error_message: &str,
        status: JobStatus,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    next_job_id: i64,
    jobs: BTreeMap<i64, QueueJob>,
    snapshots: HashMap<String, UserSnapshot>,
    round_updates: HashMap<i64, RoundUpdate>,
    outcomes: BTreeMap<String, HandicapOutcome>,
}

/// In-process store used by the CLI and the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) a user's snapshot and queue a recalculation for it.
    pub async fn enqueue_snapshot(&self, snapshot: UserSnapshot, event_type: &str) -> i64 {
        let user_id = snapshot.user_id.clone();
        let mut state = self.state.write().await;
        state.snapshots.insert(user_id.clone(), snapshot);
        state.next_job_id += 1;
        let id = state.next_job_id;
        state.jobs.insert(id, QueueJob::new(id, user_id, event_type));
        id
    }

    /// Queue a job for a user whose snapshot may not exist.
    pub async fn enqueue(&self, user_id: &str, event_type: &str) -> i64 {
        let mut state = self.state.write().await;
        state.next_job_id += 1;
        let id = state.next_job_id;
        state.jobs.insert(id, QueueJob::new(id, user_id, event_type));
        id
    }

    pub async fn job(&self, job_id: i64) -> Option<QueueJob> {
        self.state.read().await.jobs.get(&job_id).cloned()
    }

    pub async fn pending_count(&self) -> usize {
        self.state
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .count()
    }

    pub async fn handicap_index(&self, user_id: &str) -> Option<f64> {
        self.state
            .read()
            .await
            .outcomes
            .get(user_id)
            .map(|o| o.handicap_index)
    }

    pub async fn round_update(&self, round_id: i64) -> Option<RoundUpdate> {
        self.state.read().await.round_updates.get(&round_id).cloned()
    }

    /// Latest committed outcome per user, ordered by user id.
    pub async fn outcomes(&self) -> Vec<HandicapOutcome> {
        self.state.read().await.outcomes.values().cloned().collect()
    }
}

#[async_trait]
impl HandicapStore for MemoryStore {
    async fn pending_jobs(&self, limit: usize) -> Result<Vec<QueueJob>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .jobs
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn load_snapshot(&self, user_id: &str) -> Result<UserSnapshot, StoreError> {
        self.state
            .read()
            .await
            .snapshots
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::new(format!("user profile not found for {user_id}")))
    }

    async fn commit_outcome(
        &self,
        job_id: i64,
        outcome: &HandicapOutcome,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let Some(job) = state.jobs.get_mut(&job_id) else {
            return Err(StoreError::new(format!("queue job {job_id} not found")));
        };
        job.status = JobStatus::Completed;
        job.error_message = None;
        for update in &outcome.round_updates {
            state.round_updates.insert(update.id, update.clone());
        }
        state
            .outcomes
            .insert(outcome.user_id.clone(), outcome.clone());
        Ok(())
    }

    async fn record_failure(
        &self,
        job_id: i64,
        attempts: u32,
        error_message: &str,
        status: JobStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let job = state
            .jobs
            .get_mut(&job_id)
            .ok_or_else(|| StoreError::new(format!("queue job {job_id} not found")))?;
        job.attempts = attempts;
        job.error_message = Some(error_message.to_string());
        job.status = status;
        Ok(())
    }
}
