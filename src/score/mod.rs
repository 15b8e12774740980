//! Scoring collaborator — trait seam plus the in-process heuristic model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScoreError;

/// One employment entry in the scorer's input shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkedAt {
    pub company_name: String,
    pub staff_count_range: String,
    pub company_industry: String,
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub years: i32,
}

/// One education entry in the scorer's input shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudiedAt {
    pub school_name: String,
    pub degree_level: String,
    pub field_of_study: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Mapped profile handed to the scorer. Pure data, no I/O to produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreInput {
    pub username: String,
    pub connections: u32,
    pub worked_at: Vec<WorkedAt>,
    pub studied_at: Vec<StudiedAt>,
}

/// Per-feature contributions backing a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFeatures {
    pub work_score: f64,
    pub edu_score: f64,
    pub degree: u32,
}

/// Why the score came out the way it did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub features: ScoreFeatures,
    pub important_factors: Vec<String>,
}

/// Scorer output, stored on the job record when the pipeline completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub username: String,
    pub score: f64,
    pub label: u8,
    pub explanation: ScoreExplanation,
}

/// Scoring collaborator.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Compute a score for a mapped profile. May be slow, may fail.
    async fn score(&self, input: &ScoreInput) -> Result<ScoreResult, ScoreError>;
}

const POSSIBLE_FACTORS: &[&str] = &[
    "Worked at large companies",
    "Strong professional network",
    "Relevant industry experience",
    "Advanced degree",
    "Leadership positions",
    "Multiple certifications",
    "Active community involvement",
];

/// Stand-in model: simulated inference delay and pseudo-random outputs,
/// until a real model backend sits behind the `Scorer` trait.
pub struct HeuristicScorer {
    inference_delay: Duration,
}

impl HeuristicScorer {
    pub fn new(inference_delay: Duration) -> Self {
        Self { inference_delay }
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    async fn score(&self, input: &ScoreInput) -> Result<ScoreResult, ScoreError> {
        info!(username = %input.username, "Running model prediction");

        tokio::time::sleep(self.inference_delay).await;

        // rand's thread-local rng is !Send, so keep it out of await scope.
        let result = {
            use rand::Rng;
            use rand::seq::SliceRandom;

            let mut rng = rand::thread_rng();

            let score = round2(rng.gen_range(0.5..0.99));
            let label = u8::from(score > 0.7);

            let features = ScoreFeatures {
                work_score: round1(rng.gen_range(5.0..15.0)),
                edu_score: round1(rng.gen_range(0.5..3.0)),
                degree: *[15, 20, 25, 30].choose(&mut rng).unwrap_or(&15),
            };

            let factor_count = rng.gen_range(2..=4);
            let important_factors = POSSIBLE_FACTORS
                .choose_multiple(&mut rng, factor_count)
                .map(|f| f.to_string())
                .collect();

            ScoreResult {
                username: input.username.clone(),
                score,
                label,
                explanation: ScoreExplanation {
                    features,
                    important_factors,
                },
            }
        };

        Ok(result)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fixed result for tests elsewhere in the crate.
#[cfg(test)]
pub fn test_result(username: &str) -> ScoreResult {
    ScoreResult {
        username: username.to_string(),
        score: 0.8,
        label: 1,
        explanation: ScoreExplanation {
            features: ScoreFeatures {
                work_score: 10.0,
                edu_score: 2.0,
                degree: 20,
            },
            important_factors: vec!["Relevant industry experience".to_string()],
        },
    }
}
