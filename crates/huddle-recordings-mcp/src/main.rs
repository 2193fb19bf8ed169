//! Huddle Recordings MCP Server
//!
//! Model Context Protocol server giving LLM agents read-only access to huddle
//! recordings and their diarized transcripts over stdio.

use std::sync::Arc;

use clap::Parser;
use huddle_recordings_client::ApiGateway;
use huddle_recordings_mcp::cli::Cli;
use huddle_recordings_mcp::logging;
use huddle_recordings_mcp::server::HuddleRecordingsServer;
use rmcp::ServiceExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables take precedence.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logging::init(cli.debug)?;

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, refusing to start");
            std::process::exit(1);
        }
    };

    let api_prefix: String = config.base_url().chars().take(30).collect();
    tracing::info!(api = %api_prefix, "Initialized huddle recordings server");

    let gateway = ApiGateway::new(config)?;
    let server = HuddleRecordingsServer::new(Arc::new(gateway));

    tracing::info!("huddle-recordings-mcp starting (stdio transport)");
    let transport = rmcp::transport::io::stdio();
    let service = server.serve(transport).await?;

    tokio::select! {
        result = service.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Server shutdown requested");
        }
    }

    Ok(())
}
