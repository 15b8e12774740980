//! Job record and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::score::ScoreResult;

/// Status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job has been accepted and its pipeline has not finished yet.
    InProgress,
    /// Pipeline finished; the record carries a result.
    Complete,
    /// Pipeline failed; the record carries an error message.
    Failed,
}

impl JobStatus {
    /// Check if this status allows transitioning to another status.
    pub fn can_transition_to(&self, target: JobStatus) -> bool {
        use JobStatus::*;

        matches!((self, target), (InProgress, Complete) | (InProgress, Failed))
    }

    /// Check if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InProgress => "inprogress",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Validated submission payload. Immutable once the job is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobInput {
    pub name: String,
    pub cell_number: String,
    pub linkedin_account: String,
}

/// One job record per submitted request.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// Unique id, assigned at creation.
    pub id: Uuid,
    /// Current status.
    pub status: JobStatus,
    /// The submission that created this job.
    pub input: JobInput,
    /// Present only when `status` is `Complete`.
    pub result: Option<ScoreResult>,
    /// Present only when `status` is `Failed`.
    pub error: Option<String>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new in-progress job.
    pub fn new(id: Uuid, input: JobInput) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::InProgress,
            input,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}
