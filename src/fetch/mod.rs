//! Profile fetcher collaborator — trait seam plus the RapidAPI client.

mod mapping;
mod profile;

pub use mapping::map_score_input;
pub use profile::{Education, Experience, LinkedInProfile};

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

use crate::error::FetchError;

/// Request timeout for the profile API. The endpoint can be slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Profile retrieval collaborator.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch the profile behind a LinkedIn URL. May be slow, may fail for
    /// network, not-found, or rate-limit reasons — all treated as failure.
    async fn fetch(&self, linkedin_url: &str) -> Result<LinkedInProfile, FetchError>;
}

/// Response envelope of the enrich-lead endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Fetcher backed by the RapidAPI "fresh-linkedin-profile-data" service.
pub struct RapidApiFetcher {
    client: reqwest::Client,
    api_key: SecretString,
    api_host: String,
}

impl RapidApiFetcher {
    pub fn new(api_key: SecretString, api_host: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            api_host: api_host.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("https://{}/enrich-lead", self.api_host)
    }
}

#[async_trait]
impl ProfileFetcher for RapidApiFetcher {
    async fn fetch(&self, linkedin_url: &str) -> Result<LinkedInProfile, FetchError> {
        info!(url = %linkedin_url, "Fetching LinkedIn profile");

        let response = self
            .client
            .get(self.endpoint())
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", self.api_key.expose_secret())
            .query(&[("linkedin_url", linkedin_url)])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

        if envelope.message != "ok" {
            return Err(FetchError::Api(envelope.message));
        }

        let profile: LinkedInProfile = serde_json::from_value(envelope.data)
            .map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

        info!(public_id = %profile.public_id, "Profile fetched");
        Ok(profile)
    }
}
