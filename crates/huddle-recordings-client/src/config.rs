//! # Client Configuration
//!
//! Immutable configuration for the recordings gateway, built once at process
//! start and handed to [`crate::ApiGateway`].

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::retry::RetryPolicy;

/// Timeout for general calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for single-recording fetches, which carry a full transcript
pub const DEFAULT_RECORDING_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolved gateway configuration.
#[derive(Debug)]
pub struct ClientConfig {
    base_url: String,
    api_key: SecretString,
    default_timeout: Duration,
    recording_timeout: Duration,
    retry: RetryPolicy,
}

impl ClientConfig {
    /// Build a configuration from the API base URL and key.
    ///
    /// Trailing slashes are stripped from `base_url`. Fails when either value is
    /// empty or the URL is not an absolute http(s) URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::config_error("API_BASE_URL is empty"));
        }

        let parsed = Url::parse(&base_url).map_err(|e| {
            ClientError::config_error(format!("API_BASE_URL is not a valid URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::config_error(format!(
                "API_BASE_URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::config_error("API_KEY is empty"));
        }

        Ok(Self {
            base_url,
            api_key: SecretString::from(api_key),
            default_timeout: DEFAULT_TIMEOUT,
            recording_timeout: DEFAULT_RECORDING_TIMEOUT,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_recording_timeout(mut self, timeout: Duration) -> Self {
        self.recording_timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn recording_timeout(&self) -> Duration {
        self.recording_timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}
