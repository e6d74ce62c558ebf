//! HTTP client for the public PokeAPI catalog.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{CatalogClient, CatalogError, CatalogRecord};
use crate::models::ApiId;

/// Public PokeAPI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog client backed by a PokeAPI-compatible HTTP service.
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PokeApiClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("trainer-registry/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client for the public PokeAPI.
    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL of the record for `api_id`.
    pub fn record_url(&self, api_id: ApiId) -> String {
        format!("{}/pokemon/{}", self.base_url, api_id)
    }

    fn classify(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout.as_secs())
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Http(err)
        }
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    fn name(&self) -> &'static str {
        "pokeapi"
    }

    async fn fetch_record(&self, api_id: ApiId) -> Result<CatalogRecord, CatalogError> {
        let url = self.record_url(api_id);
        info!("Fetching catalog record {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let record: CatalogRecord = response.json().await.map_err(|e| self.classify(e))?;
        debug!(
            "Catalog record {} resolved to {} with {} stats",
            api_id,
            record.name,
            record.stats.len()
        );

        Ok(record)
    }
}
