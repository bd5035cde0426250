// src/services/catalog.rs

//! solved.ac problem catalog client.
//!
//! Issues a single search request per tier with server-side random
//! ordering. The selector does its own sampling on top, so the client
//! never shuffles locally.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{CatalogConfig, Problem, SearchResponse, TierRange};

/// Source of candidate problems for a tier's level range.
///
/// The seam between the selector and the network; tests swap in a
/// canned in-memory source.
#[async_trait]
pub trait ProblemSource {
    /// Fetch a randomly ordered batch of problems within the given range.
    async fn search(&self, range: &TierRange) -> Result<Vec<Problem>>;
}

/// HTTP client for the solved.ac search endpoint.
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration.
    pub fn new(client: Client, config: CatalogConfig) -> Self {
        Self { client, config }
    }

    /// Query parameters for a tier range search.
    fn query_params(&self, range: &TierRange) -> [(&'static str, String); 5] {
        [
            (
                "query",
                format!("tier:{}..{}", range.min_level, range.max_level),
            ),
            ("page", "1".to_string()),
            ("sort", "random".to_string()),
            ("direction", "desc".to_string()),
            ("size", self.config.fetch_size.to_string()),
        ]
    }
}

#[async_trait]
impl ProblemSource for CatalogClient {
    async fn search(&self, range: &TierRange) -> Result<Vec<Problem>> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.query_params(range))
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        log::debug!(
            "Catalog returned {} candidates for tier '{}' (levels {}..{})",
            body.items.len(),
            range.name,
            range.min_level,
            range.max_level
        );
        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_encode_tier_range() {
        let client = CatalogClient::new(Client::new(), CatalogConfig::default());
        let range = TierRange {
            name: "silver".to_string(),
            min_level: 6,
            max_level: 10,
        };

        let params = client.query_params(&range);
        assert_eq!(params[0], ("query", "tier:6..10".to_string()));
        assert_eq!(params[2], ("sort", "random".to_string()));
        assert_eq!(params[4], ("size", "50".to_string()));
    }
}
