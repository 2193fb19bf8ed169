//! MCP ServerHandler implementation for huddle recordings.
//!
//! Exposes two read-only tools backed by the recordings API:
//!
//! - `list_recordings` — Page through recording summaries, newest first
//! - `get_recording` — Fetch one recording with its full diarized transcript
//!
//! Both tools always answer with a JSON string. Gateway failures and invalid
//! arguments are rendered as error payloads rather than protocol errors.

use std::sync::Arc;

use huddle_recordings_client::{ApiGateway, ListRecordingsQuery, RecordingId};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use tracing::error;

use crate::tools::*;

/// Name advertised to MCP hosts.
pub const SERVER_NAME: &str = "smh-huddle-recordings";

const LIST_FAILURE: &str = "Failed to fetch recordings";
const GET_FAILURE: &str = "Failed to fetch recording";

/// Huddle recordings MCP server handler.
#[derive(Debug, Clone)]
pub struct HuddleRecordingsServer {
    tool_router: ToolRouter<Self>,
    gateway: Arc<ApiGateway>,
}

impl HuddleRecordingsServer {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway,
        }
    }

    pub fn gateway(&self) -> &Arc<ApiGateway> {
        &self.gateway
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for HuddleRecordingsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("SMH Huddle Recordings".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Read-only access to huddle (call) recordings and their diarized transcripts"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Huddle recordings are team calls with auto-generated metadata and diarized \
                 transcripts.\n\
                 Workflow: list_recordings (newest first) → get_recording for the ones you need.\n\
                 The tldr field is only quick context; build summaries from the full transcript.\n\
                 Summary format, per speaker: what was done, problems encountered, future plans, \
                 agreements reached.\n\
                 Transcripts are large: keep get_recording to about 7 calls per conversation."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl HuddleRecordingsServer {
    /// List huddle recordings, newest first.
    #[tool(
        name = "list_recordings",
        description = "Get a list of huddle (call) recordings. Recordings are sorted by date in descending order (newest first). Use the \"tldr\" field for quick context, but create proper summaries from the full transcript using get_recording. Returns a JSON page of recordings with metadata."
    )]
    pub async fn list_recordings(
        &self,
        Parameters(params): Parameters<ListRecordingsParams>,
    ) -> String {
        let query = match ListRecordingsQuery::new(params.skip, params.limit, params.period) {
            Ok(q) => q,
            Err(e) => return client_error_json(LIST_FAILURE, &e, None),
        };

        match self.gateway.list_recordings(&query).await {
            Ok(data) => to_pretty_json(&data),
            Err(e) => {
                error!(error = %e, "list_recordings failed");
                client_error_json(LIST_FAILURE, &e, None)
            }
        }
    }

    /// Fetch one recording with its diarized transcript.
    #[tool(
        name = "get_recording",
        description = "Get detailed information about a specific recording, including the full diarized transcript and metadata. Use it to create summaries in the standard format: what was done, problems encountered, future plans, agreements reached. Limit usage to ~7 calls per conversation."
    )]
    pub async fn get_recording(
        &self,
        Parameters(params): Parameters<GetRecordingParams>,
    ) -> String {
        let id = match RecordingId::parse(&params.recording_id) {
            Ok(id) => id,
            Err(e) => return client_error_json(GET_FAILURE, &e, None),
        };

        match self.gateway.get_recording(&id).await {
            Ok(mut data) => {
                inject_usage_hint(&mut data);
                to_pretty_json(&data)
            }
            Err(e) => {
                error!(recording_id = %id, error = %e, "get_recording failed");
                client_error_json(GET_FAILURE, &e, Some(id.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_recordings_client::ClientConfig;
    use serde_json::{json, Value};
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(base_url: &str) -> HuddleRecordingsServer {
        let config = ClientConfig::new(base_url, "test-key").unwrap();
        HuddleRecordingsServer::new(Arc::new(ApiGateway::new(config).unwrap()))
    }

    /// Mock API that fails the test if any request reaches it.
    async fn untouched_api() -> MockServer {
        let api = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&api)
            .await;
        api
    }

    #[test]
    fn test_server_info() {
        let server = server_for("https://api.example.com");
        let info = server.get_info();

        assert_eq!(info.server_info.name, "smh-huddle-recordings");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("get_recording"));
        assert!(instructions.contains("7 calls"));
    }

    #[tokio::test]
    async fn test_negative_skip_rejected_without_request() {
        let api = untouched_api().await;
        let server = server_for(&api.uri());

        for skip in [-1, -100] {
            let result = server
                .list_recordings(Parameters(ListRecordingsParams {
                    skip,
                    ..Default::default()
                }))
                .await;
            let parsed: Value = serde_json::from_str(&result).unwrap();
            assert_eq!(parsed["error"], "Invalid parameter");
            assert_eq!(parsed["message"], "skip must be non-negative");
        }
    }

    #[tokio::test]
    async fn test_limit_out_of_range_rejected_without_request() {
        let api = untouched_api().await;
        let server = server_for(&api.uri());

        for limit in [0, -1, 101, 10_000] {
            let result = server
                .list_recordings(Parameters(ListRecordingsParams {
                    limit,
                    ..Default::default()
                }))
                .await;
            let parsed: Value = serde_json::from_str(&result).unwrap();
            assert_eq!(parsed["kind"], "validation");
            assert_eq!(parsed["message"], "limit must be between 1 and 100");
        }
    }

    #[tokio::test]
    async fn test_blank_recording_id_rejected_without_request() {
        let api = untouched_api().await;
        let server = server_for(&api.uri());

        for recording_id in ["", "   ", "\n\t"] {
            let result = server
                .get_recording(Parameters(GetRecordingParams {
                    recording_id: recording_id.to_string(),
                }))
                .await;
            let parsed: Value = serde_json::from_str(&result).unwrap();
            assert_eq!(parsed["error"], "Invalid parameter");
            assert_eq!(
                parsed["message"],
                "recording_id is required and cannot be empty"
            );
        }
    }

    #[tokio::test]
    async fn test_list_recordings_pretty_prints_payload() {
        let api = MockServer::start().await;
        let page = json!({
            "items": [{"id": "r5", "tldr": "Revue du sprint — équipe"}],
            "skip": 0,
            "limit": 1
        });
        Mock::given(method("GET"))
            .and(path("/recordings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(&api)
            .await;

        let server = server_for(&api.uri());
        let result = server
            .list_recordings(Parameters(ListRecordingsParams {
                limit: 1,
                ..Default::default()
            }))
            .await;

        assert!(result.contains("Revue du sprint — équipe"));
        assert!(result.starts_with("{\n  \"items\""));
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, page);
    }

    #[tokio::test]
    async fn test_get_recording_trims_id_and_adds_hint() {
        let api = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recordings/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "r1",
                "transcript": [{"speaker": "Ana", "text": "Done with billing"}]
            })))
            .expect(1)
            .mount(&api)
            .await;

        let server = server_for(&api.uri());
        let result = server
            .get_recording(Parameters(GetRecordingParams {
                recording_id: "  r1  ".to_string(),
            }))
            .await;

        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["id"], "r1");
        assert_eq!(parsed["transcript"][0]["speaker"], "Ana");
        assert_eq!(parsed["_usage_hint"], USAGE_HINT);
    }

    #[tokio::test]
    async fn test_get_recording_http_error_echoes_id() {
        let api = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recordings/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
            .expect(1)
            .mount(&api)
            .await;

        let server = server_for(&api.uri());
        let result = server
            .get_recording(Parameters(GetRecordingParams {
                recording_id: "gone".to_string(),
            }))
            .await;

        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"], "Failed to fetch recording");
        assert_eq!(parsed["message"], "API returned error status 404: not found");
        assert_eq!(parsed["recording_id"], "gone");
        assert!(parsed["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_list_recordings_malformed_response_reported() {
        let api = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recordings"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&api)
            .await;

        let server = server_for(&api.uri());
        let result = server
            .list_recordings(Parameters(ListRecordingsParams::default()))
            .await;

        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["error"], "Failed to fetch recordings");
        assert_eq!(parsed["kind"], "malformed_response");
        assert!(parsed.get("recording_id").is_none());
    }
}
