//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings shared by catalog and webhook calls
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog (solved.ac) search settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Difficulty distribution and filtering rules
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Tier name to difficulty level range mappings
    #[serde(default = "defaults::tier_ranges")]
    pub tiers: Vec<TierRange>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Look up the level range for a tier name.
    pub fn tier_range(&self, name: &str) -> Option<&TierRange> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(AppError::validation("catalog.base_url is empty"));
        }
        if self.catalog.fetch_size == 0 {
            return Err(AppError::validation("catalog.fetch_size must be > 0"));
        }
        if self.tiers.is_empty() {
            return Err(AppError::validation("No tiers defined"));
        }
        for tier in &self.tiers {
            if tier.min_level == 0 || tier.min_level > tier.max_level {
                return Err(AppError::validation(format!(
                    "Tier '{}' has an invalid level range {}..{}",
                    tier.name, tier.min_level, tier.max_level
                )));
            }
        }
        if self.selection.distribution.is_empty() {
            return Err(AppError::validation("selection.distribution is empty"));
        }
        for quota in &self.selection.distribution {
            if self.tier_range(&quota.tier).is_none() {
                return Err(AppError::validation(format!(
                    "Unknown tier '{}' in selection.distribution",
                    quota.tier
                )));
            }
        }
        if self.selection.total_count() == 0 {
            return Err(AppError::validation(
                "selection.distribution requests zero problems",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            catalog: CatalogConfig::default(),
            selection: SelectionConfig::default(),
            tiers: defaults::tier_ranges(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Catalog search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// solved.ac problem search endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Batch size per search request. Oversized on purpose: already-used
    /// problems get filtered out of each batch, so the selector needs far
    /// more candidates than the per-tier quota.
    #[serde(default = "defaults::fetch_size")]
    pub fetch_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            fetch_size: defaults::fetch_size(),
        }
    }
}

/// Difficulty distribution and candidate filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Tier quotas, processed in order. The total is the number of
    /// problems per weekly digest.
    #[serde(default = "defaults::distribution")]
    pub distribution: Vec<TierQuota>,

    /// Keep only problems with a Korean title
    #[serde(default = "defaults::require_korean_title")]
    pub require_korean_title: bool,
}

impl SelectionConfig {
    /// Total number of problems requested across all tiers.
    pub fn total_count(&self) -> usize {
        self.distribution.iter().map(|q| q.count).sum()
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            distribution: defaults::distribution(),
            require_korean_title: defaults::require_korean_title(),
        }
    }
}

/// Number of problems requested from one tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierQuota {
    /// Tier name, must match a [`TierRange`]
    pub tier: String,

    /// How many problems to pick from this tier
    pub count: usize,
}

/// Inclusive difficulty level interval for a named tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierRange {
    /// Tier name (e.g. "bronze")
    pub name: String,

    /// Lowest solved.ac level in this tier
    pub min_level: u32,

    /// Highest solved.ac level in this tier
    pub max_level: u32,
}

mod defaults {
    use super::{TierQuota, TierRange};

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bojweekly/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Catalog defaults
    pub fn base_url() -> String {
        "https://solved.ac/api/v3/search/problem".into()
    }
    pub fn fetch_size() -> usize {
        50
    }

    // Selection defaults: 4 problems per week, weighted towards silver
    pub fn distribution() -> Vec<TierQuota> {
        vec![
            TierQuota {
                tier: "bronze".to_string(),
                count: 1,
            },
            TierQuota {
                tier: "silver".to_string(),
                count: 2,
            },
            TierQuota {
                tier: "gold".to_string(),
                count: 1,
            },
        ]
    }
    pub fn require_korean_title() -> bool {
        true
    }

    // solved.ac level bands
    pub fn tier_ranges() -> Vec<TierRange> {
        vec![
            TierRange {
                name: "bronze".to_string(),
                min_level: 1,
                max_level: 5,
            },
            TierRange {
                name: "silver".to_string(),
                min_level: 6,
                max_level: 10,
            },
            TierRange {
                name: "gold".to_string(),
                min_level: 11,
                max_level: 15,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_distribution_totals_four() {
        assert_eq!(Config::default().selection.total_count(), 4);
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_fetch_size() {
        let mut config = Config::default();
        config.catalog.fetch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_distribution_tier() {
        let mut config = Config::default();
        config.selection.distribution.push(TierQuota {
            tier: "platinum".to_string(),
            count: 1,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_tier_range() {
        let mut config = Config::default();
        config.tiers[0].min_level = 9;
        config.tiers[0].max_level = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let toml_src = r#"
            [selection]
            require_korean_title = false
            distribution = [
                { tier = "silver", count = 3 },
            ]
        "#;

        let config: Config = toml::from_str(toml_src).unwrap();
        assert!(!config.selection.require_korean_title);
        assert_eq!(config.selection.total_count(), 3);
        // Untouched sections keep their defaults
        assert_eq!(config.catalog.fetch_size, 50);
        assert_eq!(config.tiers.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tier_range_lookup() {
        let config = Config::default();
        let silver = config.tier_range("silver").unwrap();
        assert_eq!(silver.min_level, 6);
        assert_eq!(silver.max_level, 10);
        assert!(config.tier_range("ruby").is_none());
    }
}
