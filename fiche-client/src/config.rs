//! Client configuration

use std::time::Duration;

/// Default quiet period before a dish search fires
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;

/// Client configuration for talking to the back-office API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | FICHE_API_URL | http://localhost:8000 | Backend base URL |
/// | FICHE_API_PREFIX | /api | Path prefix of every endpoint |
/// | FICHE_TIMEOUT_SECS | 30 | Request timeout |
/// | FICHE_SEARCH_DEBOUNCE_MS | 200 | Dish autocomplete quiet period |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Prefix prepended to every endpoint path
    pub api_prefix: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Dish search debounce, in milliseconds
    pub search_debounce_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: "/api".into(),
            timeout: 30,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("FICHE_API_URL").unwrap_or(defaults.base_url),
            api_prefix: std::env::var("FICHE_API_PREFIX").unwrap_or(defaults.api_prefix),
            timeout: std::env::var("FICHE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            search_debounce_ms: std::env::var("FICHE_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.search_debounce_ms),
        }
    }

    /// Set the API prefix (empty for backends mounted at the root)
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the search debounce window
    pub fn with_search_debounce_ms(mut self, millis: u64) -> Self {
        self.search_debounce_ms = millis;
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Base URL joined with the prefix, without trailing slash
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
