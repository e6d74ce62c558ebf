//! Remote creature catalog.
//!
//! The catalog resolves an external numeric id into a name and a list of
//! base stats. Every lookup goes to the network: nothing is cached and
//! nothing is retried.

mod pokeapi;

pub use pokeapi::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ApiId, Stat};

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Catalog returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Catalog did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Undecodable catalog response: {0}")]
    Decode(String),
}

/// Stat entry as the catalog encodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStat {
    pub stat: NamedResource,
    pub base_stat: u32,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A decoded catalog record. Fields this crate does not use are kept in
/// the `extra` maps so the body survives unchanged. A body without
/// `stats` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub name: String,

    pub stats: Vec<CatalogStat>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogRecord {
    /// Flatten the catalog stat entries into plain stats, in catalog order.
    pub fn stat_list(&self) -> Vec<Stat> {
        self.stats
            .iter()
            .map(|s| Stat::new(s.stat.name.clone(), s.base_stat))
            .collect()
    }
}

/// Trait for catalog clients.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the full record for an external id.
    async fn fetch_record(&self, api_id: ApiId) -> Result<CatalogRecord, CatalogError>;

    /// Fetch only the display name.
    async fn fetch_name(&self, api_id: ApiId) -> Result<String, CatalogError> {
        Ok(self.fetch_record(api_id).await?.name)
    }

    /// Fetch only the stats.
    async fn fetch_stats(&self, api_id: ApiId) -> Result<Vec<Stat>, CatalogError> {
        Ok(self.fetch_record(api_id).await?.stat_list())
    }
}

/// In-memory catalog for tests.
#[cfg(test)]
pub struct StubCatalog {
    records: std::collections::HashMap<ApiId, CatalogRecord>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StubCatalog {
    pub fn new() -> Self {
        Self {
            records: std::collections::HashMap::new(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn with_pokemon(mut self, api_id: ApiId, name: &str, stats: &[(&str, u32)]) -> Self {
        let record = CatalogRecord {
            name: name.to_string(),
            stats: stats
                .iter()
                .map(|(stat, value)| CatalogStat {
                    stat: NamedResource {
                        name: stat.to_string(),
                        extra: serde_json::Map::new(),
                    },
                    base_stat: *value,
                    extra: serde_json::Map::new(),
                })
                .collect(),
            extra: serde_json::Map::new(),
        };
        self.records.insert(api_id, record);
        self
    }

    /// Number of `fetch_record` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CatalogClient for StubCatalog {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_record(&self, api_id: ApiId) -> Result<CatalogRecord, CatalogError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.records
            .get(&api_id)
            .cloned()
            .ok_or_else(|| CatalogError::HttpStatus {
                status: 404,
                url: format!("stub://pokemon/{}", api_id),
            })
    }
}
