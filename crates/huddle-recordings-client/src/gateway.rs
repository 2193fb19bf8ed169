//! # Request Gateway
//!
//! Issues authenticated requests against the recordings API. Timeouts and
//! connection failures are retried with exponential backoff; HTTP error statuses
//! and unparseable bodies fail on the spot.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::retry::{Sleeper, TokioSleeper};

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Longest raw body excerpt surfaced for error responses without a `message`
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// Gateway to the recordings API.
///
/// Holds no per-call state: concurrent calls each run their own retry loop.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: Client,
    config: Arc<ClientConfig>,
    sleeper: Arc<dyn Sleeper>,
}

impl ApiGateway {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace the sleeper used between retries.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue `method` against `base_url + endpoint` and parse the JSON body.
    ///
    /// `timeout` bounds each attempt separately; a retry gets a fresh window.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> ClientResult<Value> {
        let url = format!("{}{}", self.config.base_url(), endpoint);
        let policy = self.config.retry_policy();
        let max_attempts = policy.max_attempts();

        debug!(%method, %url, "Making API request");

        let mut last_error = None;
        for attempt in 0..max_attempts {
            match self.attempt(&method, &url, params, timeout).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %e,
                        "Retryable API request failure"
                    );
                    last_error = Some(e);
                    if let Some(delay) = policy.delay_before_retry(attempt) {
                        self.sleeper.sleep(delay).await;
                    }
                }
                Err(e) => {
                    error!(%url, error = %e, "API request failed");
                    return Err(e);
                }
            }
        }

        let err = last_error
            .unwrap_or_else(|| ClientError::Network("request was never attempted".to_string()));
        error!(%url, max_attempts, error = %err, "API request failed after all retries");
        Err(err)
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> ClientResult<Value> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, self.config.api_key())
            .timeout(timeout);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport_error(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e, timeout))?;
        let value: Value = serde_json::from_str(&body).map_err(ClientError::MalformedResponse)?;

        debug!(bytes = body.len(), "API request successful");
        Ok(value)
    }
}

/// Map a reqwest failure to the timeout or network variant.
fn classify_transport_error(e: &reqwest::Error, timeout: Duration) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout { timeout }
    } else {
        ClientError::Network(describe_error_chain(e))
    }
}

/// Render an error with its source chain, since reqwest keeps the useful part
/// (refused, reset, dns) in the sources.
fn describe_error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::http_status(status, error_detail(&body))
}

/// Detail for an error response: the body's `message` field when the body is a
/// JSON object carrying one, otherwise a bounded excerpt of the raw body.
fn error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map.get("message").map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
        Ok(_) => None,
        Err(_) => {
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT_CHARS).collect();
            (!excerpt.is_empty()).then_some(excerpt)
        }
    }
}
