//! Thread-safe in-memory job storage.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::{Job, JobInput, JobStatus};
use crate::error::StoreError;
use crate::score::ScoreResult;

/// In-memory job store. Reads return snapshots; terminal transitions are
/// write-once and serialized under the write lock.
pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a new in-progress job. Ids are generated upstream and never
    /// reused, but duplicates are still rejected.
    pub async fn create(&self, id: Uuid, input: JobInput) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&id) {
            return Err(StoreError::DuplicateId { id });
        }

        let job = Job::new(id, input);
        jobs.insert(id, job.clone());

        debug!(job_id = %id, "Job created");
        Ok(job)
    }

    /// Get a snapshot of a job record.
    pub async fn get(&self, id: Uuid) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Transition a job to `Complete` with its result.
    pub async fn complete(&self, id: Uuid, result: ScoreResult) -> Result<Job, StoreError> {
        self.finish(id, JobStatus::Complete, Some(result), None).await
    }

    /// Transition a job to `Failed` with a human-readable cause.
    pub async fn fail(&self, id: Uuid, error: impl Into<String>) -> Result<Job, StoreError> {
        self.finish(id, JobStatus::Failed, None, Some(error.into()))
            .await
    }

    async fn finish(
        &self,
        id: Uuid,
        status: JobStatus,
        result: Option<ScoreResult>,
        error: Option<String>,
    ) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or(StoreError::NotFound { id })?;

        if !job.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id,
                status: job.status.to_string(),
            });
        }

        job.status = status;
        job.result = result;
        job.error = error;
        job.updated_at = chrono::Utc::now();

        info!(job_id = %id, status = %status, "Job reached terminal state");
        Ok(job.clone())
    }

    /// Number of jobs in the store (all statuses).
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
