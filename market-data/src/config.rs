//! Exchange connection configuration

use std::env;
use std::time::Duration;

/// Default REST base URL (API v5)
pub const DEFAULT_BASE_URL: &str = "https://www.okx.com/api/v5";

/// Exchange connection configuration
#[derive(Debug, Clone)]
pub struct OkxConfig {
    /// REST base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("OKX_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                env::var("OKX_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

impl OkxConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}
