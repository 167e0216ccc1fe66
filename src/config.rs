//! Configuration management for the search query sanitizer.
//!
//! Configuration is loaded from environment variables following the 12-factor app pattern.

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_DEBOUNCE, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_QUERY_LENGTH,
    MAX_MAX_QUERY_LENGTH, MIN_MAX_QUERY_LENGTH,
};
use crate::error::SearchError;
use crate::products::product_search_path;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sanitizer configuration
    pub sanitizer: SanitizerConfig,

    /// Product API configuration
    pub api: ApiConfig,

    /// Search input pacing configuration
    pub search: SearchConfig,
}

/// Sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Maximum sanitized query length (Unicode scalar values)
    pub max_query_length: usize,
}

/// Product API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL prepended to request paths
    pub base_url: String,
}

/// Search input pacing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a keystroke triggers a search
    pub debounce: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// All optional:
    /// - `SEARCH_MAX_QUERY_LENGTH`: Maximum sanitized query length (default: 200, range 1..=4096)
    /// - `SEARCH_API_BASE_URL`: Product API base URL (default: http://localhost:8080)
    /// - `SEARCH_DEBOUNCE_MS`: Debounce delay in milliseconds (default: 300)
    pub fn from_env() -> Result<Self, SearchError> {
        let max_query_length = env_parse("SEARCH_MAX_QUERY_LENGTH", DEFAULT_MAX_QUERY_LENGTH);

        let base_url = std::env::var("SEARCH_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let debounce_ms = env_parse("SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);

        let config = Config {
            sanitizer: SanitizerConfig { max_query_length },
            api: ApiConfig { base_url },
            search: SearchConfig {
                debounce: Duration::from_millis(debounce_ms),
            },
        };
        config.validate()?;

        info!(
            max_query_length = config.sanitizer.max_query_length,
            base_url = %config.api.base_url,
            debounce_ms,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check values that cannot be expressed by the field types alone.
    pub fn validate(&self) -> Result<(), SearchError> {
        let len = self.sanitizer.max_query_length;
        if !(MIN_MAX_QUERY_LENGTH..=MAX_MAX_QUERY_LENGTH).contains(&len) {
            return Err(SearchError::config(format!(
                "max_query_length must be between {} and {}, got {}",
                MIN_MAX_QUERY_LENGTH, MAX_MAX_QUERY_LENGTH, len
            )));
        }

        if self.api.base_url.trim().is_empty() {
            return Err(SearchError::config("api base_url must not be empty"));
        }

        Ok(())
    }

    /// Full product search URL for raw user input.
    ///
    /// Returns `None` when the input sanitizes to nothing, in which case no
    /// request should be issued.
    pub fn product_search_url(&self, raw: &str) -> Option<String> {
        let path = product_search_path(raw, self.sanitizer.max_query_length)?;
        let base = self.api.base_url.trim_end_matches('/');
        Some(format!("{}{}", base, path))
    }
}

/// Parse an optional environment variable, falling back to `default` when it
/// is unset or unparseable.
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}
