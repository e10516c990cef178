//! Runtime configuration
//!
//! The API base URL comes from `--api-url` or the environment. Command-line
//! values take precedence over environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::view::PageSize;

// Environment variable names
pub const ENV_API_URL: &str = "CONTACTS_API_URL";
pub const ENV_PAGE_SIZE: &str = "CONTACTS_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "CONTACTS_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base the `/contacts` path is appended to.
    pub api_url: Url,
    pub page_size: PageSize,
    /// Per-request timeout. Requests are never retried.
    pub timeout: Duration,
}

impl Config {
    /// Load from the process environment, with an optional URL override.
    pub fn load(api_url: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(api_url, |key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(api_url: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = api_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()))
            .ok_or(ConfigError::MissingApiUrl(ENV_API_URL))?;

        let api_url = parse_base_url(raw_url.trim())?;

        let page_size = match lookup(ENV_PAGE_SIZE) {
            Some(raw) => PageSize::parse(&raw).ok_or(ConfigError::InvalidPageSize(raw))?,
            None => PageSize::default(),
        };

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            page_size,
            timeout,
        })
    }
}

/// Only absolute http(s) URLs that can carry path segments are accepted.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}
