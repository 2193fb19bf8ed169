//! Shared helper functions for MCP tool implementations.

use chrono::{SecondsFormat, Utc};
use huddle_recordings_client::ClientError;
use serde::Serialize;
use serde_json::Value;

use super::params::ToolErrorResponse;

/// Label for caller input rejected before any request is made.
pub const INVALID_PARAMETER: &str = "Invalid parameter";

/// Key added to recording payloads that carry a transcript.
pub const USAGE_HINT_KEY: &str = "_usage_hint";

pub const USAGE_HINT: &str = "Create summaries from the diarized transcript. \
     Format per speaker: Name, What was done, Problems, Plans, Agreements";

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    serde_json::json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Serialize with two-space indentation, leaving non-ASCII text unescaped.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| error_json("serialization_error", &e.to_string()))
}

/// Current UTC time as ISO-8601.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Render a gateway error as the tool's error payload.
///
/// Validation errors get the `Invalid parameter` label and no timestamp; every
/// other kind gets `label` and a capture timestamp.
pub fn client_error_json(label: &str, err: &ClientError, recording_id: Option<&str>) -> String {
    let response = match err {
        ClientError::Validation(message) => ToolErrorResponse {
            error: INVALID_PARAMETER.to_string(),
            kind: err.kind(),
            message: message.clone(),
            status: None,
            recording_id: None,
            timestamp: None,
        },
        _ => ToolErrorResponse {
            error: label.to_string(),
            kind: err.kind(),
            message: err.to_string(),
            status: err.status(),
            recording_id: recording_id.map(str::to_string),
            timestamp: Some(utc_timestamp()),
        },
    };
    to_pretty_json(&response)
}

/// Add the summary-format hint to a recording that has a transcript.
///
/// Existing keys, including a `_usage_hint` sent by the API, are left untouched.
pub fn inject_usage_hint(payload: &mut Value) {
    if let Value::Object(map) = payload {
        if map.contains_key("transcript") && !map.contains_key(USAGE_HINT_KEY) {
            map.insert(
                USAGE_HINT_KEY.to_string(),
                Value::String(USAGE_HINT.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_hint_appended_after_existing_keys() {
        let mut payload = json!({
            "id": "r1",
            "tldr": "Standup",
            "transcript": [{"speaker": "Ana", "text": "Shipped the importer"}],
            "created_at": "2026-10-01T10:00:00Z"
        });
        inject_usage_hint(&mut payload);

        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "tldr", "transcript", "created_at", "_usage_hint"]);
        assert_eq!(payload["_usage_hint"], USAGE_HINT);
        assert_eq!(payload["tldr"], "Standup");
    }

    #[test]
    fn test_usage_hint_skipped_without_transcript() {
        let mut payload = json!({"id": "r1", "tldr": "Standup"});
        let before = payload.clone();
        inject_usage_hint(&mut payload);
        assert_eq!(payload, before);

        let mut list = json!([{"transcript": []}]);
        let before = list.clone();
        inject_usage_hint(&mut list);
        assert_eq!(list, before);
    }

    #[test]
    fn test_usage_hint_does_not_overwrite() {
        let mut payload = json!({"transcript": [], "_usage_hint": "server supplied"});
        inject_usage_hint(&mut payload);
        assert_eq!(payload["_usage_hint"], "server supplied");
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let out = to_pretty_json(&json!({"speaker": "Zoë", "text": "Привет"}));
        assert!(out.contains("Zoë"));
        assert!(out.contains("Привет"));
        assert!(out.contains("\n  \"speaker\""));
    }

    #[test]
    fn test_validation_error_payload() {
        let err = ClientError::validation("limit must be between 1 and 100");
        let parsed: Value = serde_json::from_str(&client_error_json(
            "Failed to fetch recordings",
            &err,
            None,
        ))
        .unwrap();
        assert_eq!(parsed["error"], "Invalid parameter");
        assert_eq!(parsed["kind"], "validation");
        assert_eq!(parsed["message"], "limit must be between 1 and 100");
        assert!(parsed.get("timestamp").is_none());
    }

    #[test]
    fn test_gateway_error_payload_carries_context() {
        let err = ClientError::http_status(404, Some("not found".to_string()));
        let parsed: Value = serde_json::from_str(&client_error_json(
            "Failed to fetch recording",
            &err,
            Some("r9"),
        ))
        .unwrap();
        assert_eq!(parsed["error"], "Failed to fetch recording");
        assert_eq!(parsed["kind"], "http_status");
        assert_eq!(parsed["message"], "API returned error status 404: not found");
        assert_eq!(parsed["status"], 404);
        assert_eq!(parsed["recording_id"], "r9");

        let timestamp = parsed["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }
}
