//! Error types for the lead scoring service.

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Score error: {0}")]
    Score(#[from] ScoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Job store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Job {id} already exists")]
    DuplicateId { id: Uuid },

    #[error("Job {id} not found")]
    NotFound { id: Uuid },

    #[error("Job {id} is already {status}, terminal state is write-once")]
    InvalidTransition { id: Uuid, status: String },
}

/// Job runner errors.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Task queue is full ({capacity} pending)")]
    QueueFull { capacity: usize },

    #[error("Runner has been shut down")]
    ShutDown,
}

/// Profile fetcher errors.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Profile request failed: {0}")]
    Request(String),

    #[error("Profile API returned non-ok message: {0}")]
    Api(String),

    #[error("Invalid profile payload: {0}")]
    InvalidPayload(String),
}

/// Scorer errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("Scoring failed: {0}")]
    Failed(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
