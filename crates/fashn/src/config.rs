//! Generation service configuration loaded from environment variables.

use std::fmt;
use std::time::Duration;

use atelier_core::config::{normalize_base_url, optional_var, parse_var, process_env, required_var};
use atelier_core::error::CoreError;

use crate::api::FashnApi;
use crate::poll::{PollPolicy, DEFAULT_POLL_INTERVAL};

/// Public endpoint of the generation service.
pub const DEFAULT_BASE_URL: &str = "https://api.fashn.ai/v1";

/// Connection and polling settings for the try-on service.
#[derive(Clone)]
pub struct FashnConfig {
    pub base_url: String,
    pub api_key: String,
    pub poll: PollPolicy,
}

impl FashnConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default                   |
    /// |---------------------------|---------------------------|
    /// | `FASHN_API_KEY`           | required                  |
    /// | `FASHN_BASE_URL`          | `https://api.fashn.ai/v1` |
    /// | `TRYON_POLL_INTERVAL_MS`  | `2000`                    |
    /// | `TRYON_POLL_MAX_ATTEMPTS` | unbounded                 |
    /// | `TRYON_POLL_TIMEOUT_SECS` | unbounded                 |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(process_env)
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let api_key = required_var(&lookup, "FASHN_API_KEY")?;

        let base_url = optional_var(&lookup, "FASHN_BASE_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let interval = parse_var::<u64>(&lookup, "TRYON_POLL_INTERVAL_MS", "u64")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        if interval.is_zero() {
            return Err(CoreError::Validation(
                "TRYON_POLL_INTERVAL_MS must be greater than zero".into(),
            ));
        }

        let max_attempts = parse_var::<u32>(&lookup, "TRYON_POLL_MAX_ATTEMPTS", "u32")?;
        let timeout = parse_var::<u64>(&lookup, "TRYON_POLL_TIMEOUT_SECS", "u64")?
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            api_key,
            poll: PollPolicy {
                interval,
                max_attempts,
                timeout,
            },
        })
    }

    /// Build an HTTP client for this configuration.
    pub fn api(&self) -> FashnApi {
        FashnApi::new(self.base_url.clone(), self.api_key.clone())
    }
}

impl fmt::Debug for FashnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FashnConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("poll", &self.poll)
            .finish()
    }
}
