//! HTTP front end — parses requests, validates shape, and renders job
//! records as JSON. Consumes the core only through submit/get.

pub mod validate;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::error;
use uuid::Uuid;

use crate::jobs::{Job, JobOrchestrator, JobStatus};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<JobOrchestrator>,
}

/// Build the Axum router with the job and health routes.
pub fn job_routes(orchestrator: Arc<JobOrchestrator>) -> Router {
    let state = AppState { orchestrator };

    Router::new()
        .route("/job", post(create_job))
        .route("/job/{id}", get(get_job))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

// ── Jobs ────────────────────────────────────────────────────────────────

async fn create_job(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let input = match validate::validate_job_request(&body) {
        Ok(input) => input,
        Err(details) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Validation failed",
                    "details": details,
                })),
            );
        }
    };

    match state.orchestrator.submit(input).await {
        Ok(job_id) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({"job_id": job_id})),
        ),
        Err(e) => {
            error!(error = %e, "Job submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal server error",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let job_id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Invalid job ID"})),
            );
        }
    };

    match state.orchestrator.get(job_id).await {
        Some(job) => (StatusCode::OK, Json(job_response(&job))),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Job not found"})),
        ),
    }
}

/// Shape a job record for polling clients: always `status`, plus `result`
/// when complete or `error` when failed.
fn job_response(job: &Job) -> serde_json::Value {
    let mut body = serde_json::json!({"status": job.status});

    match job.status {
        JobStatus::Complete => {
            if let Some(result) = &job.result {
                body["result"] = serde_json::json!(result);
            }
        }
        JobStatus::Failed => {
            if let Some(error) = &job.error {
                body["error"] = serde_json::json!(error);
            }
        }
        JobStatus::InProgress => {}
    }

    body
}
