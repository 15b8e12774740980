use std::sync::Arc;

use lead_score::config::AppConfig;
use lead_score::fetch::{ProfileFetcher, RapidApiFetcher};
use lead_score::http::job_routes;
use lead_score::jobs::{JobOrchestrator, JobRunner, JobStore};
use lead_score::score::{HeuristicScorer, Scorer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    let Some(api_key) = config.rapidapi_key.clone() else {
        eprintln!("Error: RAPIDAPI_KEY not set");
        eprintln!("  export RAPIDAPI_KEY=<your RapidAPI key>");
        std::process::exit(1);
    };

    eprintln!("📇 Lead Score v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/job", config.port);
    eprintln!("   Workers: {}", config.max_workers);
    eprintln!("   Queue capacity: {}", config.queue_capacity);
    eprintln!("   Profile API: {}\n", config.rapidapi_host);

    // ── Core components ─────────────────────────────────────────────────
    let store = Arc::new(JobStore::new());
    let runner = Arc::new(JobRunner::new(config.max_workers, config.queue_capacity));

    // ── Collaborators ───────────────────────────────────────────────────
    let fetcher: Arc<dyn ProfileFetcher> =
        Arc::new(RapidApiFetcher::new(api_key, config.rapidapi_host.clone())?);
    let scorer: Arc<dyn Scorer> = Arc::new(HeuristicScorer::default());

    let orchestrator = Arc::new(JobOrchestrator::new(store, runner, fetcher, scorer));

    // ── HTTP server ─────────────────────────────────────────────────────
    let app = job_routes(orchestrator);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}
