//! Parameter and response structs for all MCP tools.

use huddle_recordings_client::recordings::{DEFAULT_LIMIT, DEFAULT_SKIP};
use huddle_recordings_client::ErrorKind;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

// ── list_recordings ──

/// Parameters for the `list_recordings` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListRecordingsParams {
    /// Number of recordings to skip.
    #[schemars(description = "Number of recordings to skip for pagination (default: 0)")]
    #[serde(default = "default_skip", deserialize_with = "lenient_i64")]
    pub skip: i64,
    /// Page size, 1 to 100.
    #[schemars(description = "Number of recordings to return, max 100 (default: 10)")]
    #[serde(default = "default_limit", deserialize_with = "lenient_i64")]
    pub limit: i64,
    /// Free-form period filter forwarded to the API.
    #[schemars(description = "Optional time period filter (e.g., 'today', 'week', 'month')")]
    pub period: Option<String>,
}

impl Default for ListRecordingsParams {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
            period: None,
        }
    }
}

fn default_skip() -> i64 {
    DEFAULT_SKIP
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInteger {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `5`, `5.0` and `"5"` alike; hosts do not always send pagination
/// arguments as JSON integers. Range checks happen later, in the query type.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let whole_float = |f: f64| {
        (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
            .then_some(f as i64)
    };

    match LooseInteger::deserialize(deserializer)? {
        LooseInteger::Int(n) => Ok(n),
        LooseInteger::Float(f) => {
            whole_float(f).ok_or_else(|| de::Error::custom(format!("expected an integer, got {f}")))
        }
        LooseInteger::Text(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_float))
                .ok_or_else(|| de::Error::custom(format!("expected an integer, got {text:?}")))
        }
    }
}

// ── get_recording ──

/// Parameters for the `get_recording` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetRecordingParams {
    #[schemars(description = "Unique identifier of the recording (from list_recordings)")]
    pub recording_id: String,
}

// ── errors ──

/// Error payload returned by both tools in place of data.
#[derive(Debug, Serialize)]
pub struct ToolErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
