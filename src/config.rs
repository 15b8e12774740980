//! Application configuration.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default RapidAPI host for the LinkedIn profile endpoint.
pub const DEFAULT_RAPIDAPI_HOST: &str = "fresh-linkedin-profile-data.p.rapidapi.com";

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Number of background workers executing jobs.
    pub max_workers: usize,
    /// Capacity of the pending job queue.
    pub queue_capacity: usize,
    /// RapidAPI key for the profile fetcher (None disables the real fetcher).
    pub rapidapi_key: Option<SecretString>,
    /// RapidAPI host header value.
    pub rapidapi_host: String,
}

impl AppConfig {
    /// Build config from environment variables, with defaults matching
    /// the deployed service.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = parse_env("PORT", 5014)?;
        let max_workers: usize = parse_env("MAX_WORKERS", 4)?;
        let queue_capacity: usize = parse_env("JOB_QUEUE_CAPACITY", 256)?;

        if max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_WORKERS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "JOB_QUEUE_CAPACITY".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let rapidapi_key = std::env::var("RAPIDAPI_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        let rapidapi_host =
            std::env::var("RAPIDAPI_HOST").unwrap_or_else(|_| DEFAULT_RAPIDAPI_HOST.to_string());

        Ok(Self {
            port,
            max_workers,
            queue_capacity,
            rapidapi_key,
            rapidapi_host,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("could not parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}
