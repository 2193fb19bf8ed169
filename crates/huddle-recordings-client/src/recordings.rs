//! Typed inputs and calls for the two recordings endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::gateway::ApiGateway;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Validated query for `GET /recordings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecordingsQuery {
    skip: i64,
    limit: i64,
    period: Option<String>,
}

impl Default for ListRecordingsQuery {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
            period: None,
        }
    }
}

impl ListRecordingsQuery {
    /// Validate pagination bounds. `period` is passed through as-is; an empty
    /// value is treated as absent.
    pub fn new(skip: i64, limit: i64, period: Option<String>) -> ClientResult<Self> {
        if skip < 0 {
            return Err(ClientError::validation("skip must be non-negative"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ClientError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(Self {
            skip,
            limit,
            period: period.filter(|p| !p.is_empty()),
        })
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    /// Query parameters sent to the API; server-side simplification is always on.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
            ("simplified", "true".to_string()),
        ];
        if let Some(period) = &self.period {
            params.push(("period", period.clone()));
        }
        params
    }
}

/// Opaque recording identifier, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingId(String);

impl RecordingId {
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::validation(
                "recording_id is required and cannot be empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Endpoint path with the id percent-encoded as a single path segment.
    pub fn endpoint(&self) -> ClientResult<String> {
        let mut url = Url::parse("http://localhost/")
            .map_err(|e| ClientError::validation(format!("Invalid recording endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::validation("Invalid recording endpoint"))?
            .pop_if_empty()
            .push("recordings")
            .push(&self.0);
        Ok(url.path().to_string())
    }
}

impl std::fmt::Display for RecordingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ApiGateway {
    /// List recording summaries (newest first, transcripts excluded).
    pub async fn list_recordings(&self, query: &ListRecordingsQuery) -> ClientResult<Value> {
        info!(
            skip = query.skip(),
            limit = query.limit(),
            period = query.period(),
            "Fetching recordings list"
        );
        self.request(
            Method::GET,
            "/recordings",
            &query.to_params(),
            self.config().default_timeout(),
        )
        .await
    }

    /// Fetch one recording with its diarized transcript.
    pub async fn get_recording(&self, id: &RecordingId) -> ClientResult<Value> {
        info!(recording_id = %id, "Fetching recording details");
        self.request(
            Method::GET,
            &id.endpoint()?,
            &[("simplified", "true".to_string())],
            self.config().recording_timeout(),
        )
        .await
    }
}
