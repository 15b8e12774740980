//! Lead Score — lead enrichment and scoring service.

pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod jobs;
pub mod score;
