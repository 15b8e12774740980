//! Job orchestration — ties job creation to the fetch→score pipeline and
//! the terminal commit.
//!
//! `submit` is fire-and-forget beyond the synchronous store insert: the
//! caller gets an id back immediately and observes the outcome only by
//! polling `get`.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use super::runner::JobRunner;
use super::store::JobStore;
use crate::error::Result;
use crate::fetch::{ProfileFetcher, map_score_input};
use crate::jobs::model::{Job, JobInput};
use crate::score::Scorer;

/// Orchestrates the job workflow. All dependencies are injected; there is
/// exactly one instance per process.
pub struct JobOrchestrator {
    store: Arc<JobStore>,
    runner: Arc<JobRunner>,
    fetcher: Arc<dyn ProfileFetcher>,
    scorer: Arc<dyn Scorer>,
}

impl JobOrchestrator {
    pub fn new(
        store: Arc<JobStore>,
        runner: Arc<JobRunner>,
        fetcher: Arc<dyn ProfileFetcher>,
        scorer: Arc<dyn Scorer>,
    ) -> Self {
        Self {
            store,
            runner,
            fetcher,
            scorer,
        }
    }

    /// Create a job and hand its pipeline to the runner. Returns the job id
    /// without waiting for the pipeline; a rejected enqueue fails the job
    /// rather than erroring the submission.
    pub async fn submit(&self, input: JobInput) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.store.create(id, input.clone()).await?;

        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);
        let scorer = Arc::clone(&self.scorer);
        let linkedin_url = input.linkedin_account;

        let task = Box::pin(async move {
            run_pipeline(store, fetcher, scorer, id, linkedin_url).await;
        });

        if let Err(e) = self.runner.enqueue(task).await {
            warn!(job_id = %id, error = %e, "Enqueue rejected, failing job");
            commit_failure(&self.store, id, format!("runner unavailable: {e}")).await;
        }

        Ok(id)
    }

    /// Snapshot of a job record, at any time, at any rate.
    pub async fn get(&self, id: Uuid) -> Option<Job> {
        self.store.get(id).await
    }

    /// Access to the store, for process shutdown and tests.
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }
}

/// The background pipeline: fetch, map, score, commit. Every collaborator
/// error ends as a terminal `Failed` record, never a crash.
async fn run_pipeline(
    store: Arc<JobStore>,
    fetcher: Arc<dyn ProfileFetcher>,
    scorer: Arc<dyn Scorer>,
    id: Uuid,
    linkedin_url: String,
) {
    info!(job_id = %id, "Starting job execution");

    let profile = match fetcher.fetch(&linkedin_url).await {
        Ok(profile) => profile,
        Err(e) => {
            error!(job_id = %id, error = %e, "Profile fetch failed");
            commit_failure(&store, id, e.to_string()).await;
            return;
        }
    };

    let score_input = map_score_input(&profile);

    match scorer.score(&score_input).await {
        Ok(result) => {
            if let Err(e) = store.complete(id, result).await {
                // Losing the commit race means another writer already
                // finalized this job; that indicates a bug upstream.
                error!(job_id = %id, error = %e, "Failed to commit result");
            } else {
                info!(job_id = %id, "Job completed");
            }
        }
        Err(e) => {
            error!(job_id = %id, error = %e, "Scoring failed");
            commit_failure(&store, id, e.to_string()).await;
        }
    }
}

async fn commit_failure(store: &JobStore, id: Uuid, message: String) {
    if let Err(e) = store.fail(id, message).await {
        error!(job_id = %id, error = %e, "Failed to commit failure");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{FetchError, ScoreError};
    use crate::fetch::LinkedInProfile;
    use crate::jobs::model::JobStatus;
    use crate::score::{ScoreInput, ScoreResult, test_result};

    struct StubFetcher {
        fail_with: Option<String>,
    }

    #[async_trait]
    impl ProfileFetcher for StubFetcher {
        async fn fetch(
            &self,
            _linkedin_url: &str,
        ) -> std::result::Result<LinkedInProfile, FetchError> {
            match &self.fail_with {
                Some(msg) => Err(FetchError::Api(msg.clone())),
                None => Ok(LinkedInProfile {
                    public_id: "johndoe".into(),
                    connection_count: 500,
                    ..Default::default()
                }),
            }
        }
    }

    struct StubScorer {
        fail: bool,
    }

    #[async_trait]
    impl Scorer for StubScorer {
        async fn score(
            &self,
            input: &ScoreInput,
        ) -> std::result::Result<ScoreResult, ScoreError> {
            if self.fail {
                Err(ScoreError::Failed("model unavailable".into()))
            } else {
                Ok(test_result(&input.username))
            }
        }
    }

    fn make_input() -> JobInput {
        JobInput {
            name: "John".into(),
            cell_number: "989127638825".into(),
            linkedin_account: "https://linkedin.com/in/johndoe".into(),
        }
    }

    fn make_orchestrator(
        fetch_fail: Option<&str>,
        score_fail: bool,
    ) -> JobOrchestrator {
        JobOrchestrator::new(
            Arc::new(JobStore::new()),
            Arc::new(JobRunner::new(2, 16)),
            Arc::new(StubFetcher {
                fail_with: fetch_fail.map(String::from),
            }),
            Arc::new(StubScorer { fail: score_fail }),
        )
    }

    async fn poll_terminal(orchestrator: &JobOrchestrator, id: Uuid) -> Job {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let job = orchestrator.get(id).await.expect("job must exist");
                if job.status.is_terminal() {
                    return job;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("job never reached a terminal state")
    }

    #[tokio::test]
    async fn submit_is_immediately_visible_in_progress() {
        let orchestrator = make_orchestrator(None, false);
        let id = orchestrator.submit(make_input()).await.unwrap();

        let job = orchestrator.get(id).await.unwrap();
        assert!(matches!(
            job.status,
            JobStatus::InProgress | JobStatus::Complete
        ));
        assert_eq!(job.input.name, "John");
    }

    #[tokio::test]
    async fn success_path_completes_with_result() {
        let orchestrator = make_orchestrator(None, false);
        let id = orchestrator.submit(make_input()).await.unwrap();

        let job = poll_terminal(&orchestrator, id).await;
        assert_eq!(job.status, JobStatus::Complete);
        let result = job.result.expect("complete job must carry a result");
        assert_eq!(result.username, "johndoe");
        assert!(job.error.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_fails_the_job() {
        let orchestrator = make_orchestrator(Some("not found"), false);
        let id = orchestrator.submit(make_input()).await.unwrap();

        let job = poll_terminal(&orchestrator, id).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.result.is_none());
        let error = job.error.expect("failed job must carry an error");
        assert!(error.contains("not found"), "error was: {error}");
    }

    #[tokio::test]
    async fn score_failure_fails_the_job() {
        let orchestrator = make_orchestrator(None, true);
        let id = orchestrator.submit(make_input()).await.unwrap();

        let job = poll_terminal(&orchestrator, id).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("model unavailable"));
    }

    #[tokio::test]
    async fn rejected_enqueue_fails_the_job_but_returns_id() {
        let orchestrator = make_orchestrator(None, false);
        orchestrator.runner.shutdown().await;

        let id = orchestrator.submit(make_input()).await.unwrap();
        let job = orchestrator.get(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("runner unavailable"));
    }

    #[tokio::test]
    async fn terminal_record_is_stable_across_reads() {
        let orchestrator = make_orchestrator(None, false);
        let id = orchestrator.submit(make_input()).await.unwrap();

        let first = poll_terminal(&orchestrator, id).await;
        for _ in 0..5 {
            let again = orchestrator.get(id).await.unwrap();
            assert_eq!(again.status, first.status);
            assert_eq!(again.updated_at, first.updated_at);
        }
    }

    #[tokio::test]
    async fn many_jobs_all_reach_terminal_state() {
        let orchestrator = make_orchestrator(None, false);

        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(orchestrator.submit(make_input()).await.unwrap());
        }

        for id in ids {
            let job = poll_terminal(&orchestrator, id).await;
            assert_eq!(job.status, JobStatus::Complete);
        }
    }
}
