use futures::future::join_all;
use tracing::{error, info, warn};

use crate::config::QueueConfig;
use crate::error::{JobError, StoreError};
use crate::handicap::HandicapEngine;
use crate::model::HandicapOutcome;
use crate::queue::job::{BatchSummary, QueueJob};
use crate::queue::store::HandicapStore;

/// Process one batch of pending jobs.
///
/// Jobs run concurrently and independently: a failing user is recorded
/// against its own job (retried until `max_retries`) and never affects the
/// others.
///
/// # Errors
/// Returns an error only if the pending jobs can't be fetched.
pub async fn process_queue(
    store: &dyn HandicapStore,
    engine: &HandicapEngine,
    queue_config: &QueueConfig,
) -> Result<BatchSummary, StoreError> {
    let pending = store.pending_jobs(queue_config.batch_size).await?;
    if pending.is_empty() {
        info!("no pending jobs in queue");
        return Ok(BatchSummary::default());
    }
    info!(jobs = pending.len(), "processing handicap queue");

    let results = join_all(
        pending
            .iter()
            .map(|job| process_job(store, engine, job, queue_config.max_retries)),
    )
    .await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let summary = BatchSummary {
        processed: pending.len(),
        succeeded,
        failed: pending.len() - succeeded,
    };
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "queue processing complete"
    );
    Ok(summary)
}

/// Keep processing batches until nothing is pending.
///
/// Every pass either completes a job or spends one of its attempts, so this
/// terminates after at most `max_retries` passes per job.
///
/// # Errors
/// Returns an error if a batch can't be fetched.
pub async fn run_until_drained(
    store: &dyn HandicapStore,
    engine: &HandicapEngine,
    queue_config: &QueueConfig,
) -> Result<BatchSummary, StoreError> {
    let mut total = BatchSummary::default();
    loop {
        let summary = process_queue(store, engine, queue_config).await?;
        if summary.processed == 0 {
            return Ok(total);
        }
        total.processed += summary.processed;
        total.succeeded += summary.succeeded;
        total.failed += summary.failed;
    }
}

async fn process_job(
    store: &dyn HandicapStore,
    engine: &HandicapEngine,
    job: &QueueJob,
    max_retries: u32,
) -> Result<HandicapOutcome, JobError> {
    info!(
        user_id = %job.user_id,
        attempt = job.attempts + 1,
        "processing user"
    );
    match recalculate_user(store, engine, job).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            let message = e.to_string();
            let (attempts, status) = job.status_after_failure(max_retries);
            warn!(
                user_id = %job.user_id,
                job_id = job.id,
                attempts,
                %status,
                error = %message,
                "failed to process user"
            );
            if let Err(update_error) = store
                .record_failure(job.id, attempts, &message, status)
                .await
            {
                error!(
                    job_id = job.id,
                    error = %update_error,
                    "failed to update error status for job"
                );
            }
            Err(e)
        }
    }
}

async fn recalculate_user(
    store: &dyn HandicapStore,
    engine: &HandicapEngine,
    job: &QueueJob,
) -> Result<HandicapOutcome, JobError> {
    let snapshot = store.load_snapshot(&job.user_id).await?;
    let outcome = engine.calculate(&snapshot)?;
    store.commit_outcome(job.id, &outcome).await?;
    Ok(outcome)
}
