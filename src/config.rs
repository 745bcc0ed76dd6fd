//! Centralized configuration management for libdesk

use anyhow::{Context, Result};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the library REST service
    pub api_base_url: String,
    /// Number of records requested per list page
    pub page_limit: usize,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "libdesk/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("LIBDESK_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

        let page_limit = parse_env_var("LIBDESK_PAGE_LIMIT")?.unwrap_or(10);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("LIBDESK_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("LIBDESK_USER_AGENT")
                .unwrap_or_else(|_| "libdesk/0.1.0".to_string()),
        };

        Ok(Config {
            api_base_url,
            page_limit,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid LIBDESK_API_URL: {}", self.api_base_url))?;

        if self.page_limit == 0 {
            return Err(anyhow::anyhow!("LIBDESK_PAGE_LIMIT must be at least 1"));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
