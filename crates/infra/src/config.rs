//! Environment-driven client configuration.
//!
//! ## Environment Variables
//! - `RISHTA_BASE_URL`: Backend host (default: production host)
//! - `RISHTA_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `RISHTA_SLOW_CALL_SECS`: Slow-call warning threshold in seconds
//! - `RISHTA_KEYCHAIN_SERVICE`: Keychain service name for stored
//!   credentials
//!
//! A `.env` file in the working directory is honoured when present.

use std::time::Duration;

use rishta_domain::constants::{DEFAULT_BASE_URL, SLOW_CALL_THRESHOLD};
use rishta_domain::{Result, RishtaError};
use tracing::debug;

use crate::api::ApiClientConfig;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub slow_call_threshold: Duration,
    pub keychain_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            slow_call_threshold: SLOW_CALL_THRESHOLD,
            keychain_service: "rishta".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    /// Returns `RishtaError::Config` when a set variable fails to
    /// parse or validate.
    pub fn from_env() -> Result<Self> {
        // Best effort; a missing .env file is the normal case.
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("RISHTA_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(timeout) = env_secs("RISHTA_TIMEOUT_SECS")? {
            config.timeout = timeout;
        }
        if let Some(threshold) = env_secs("RISHTA_SLOW_CALL_SECS")? {
            config.slow_call_threshold = threshold;
        }
        if let Ok(service) = std::env::var("RISHTA_KEYCHAIN_SERVICE") {
            config.keychain_service = service;
        }

        config.validate()?;
        debug!(base_url = %config.base_url, "client configuration loaded");
        Ok(config)
    }

    /// # Errors
    /// Returns `RishtaError::Config` on an empty or non-http base URL
    /// or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RishtaError::Config(format!(
                "base URL must be http(s), got {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(RishtaError::Config("timeout must be non-zero".to_owned()));
        }
        Ok(())
    }

    /// The pipeline configuration derived from this client config.
    #[must_use]
    pub fn api(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            slow_call_threshold: self.slow_call_threshold,
        }
    }
}

fn env_secs(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|err| RishtaError::Config(format!("invalid {name}: {err}")))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
