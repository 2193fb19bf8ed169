//! Command-line and environment configuration.

use clap::{ArgAction, Parser};
use huddle_recordings_client::{ClientConfig, ClientError, ClientResult};

/// MCP server for huddle recordings (stdio transport).
#[derive(Debug, Parser)]
#[command(name = "huddle-recordings-mcp", version, about)]
pub struct Cli {
    /// Base URL of the recordings API
    #[arg(long, env = "API_BASE_URL", hide_env_values = true)]
    pub api_base_url: Option<String>,

    /// API key sent in the X-API-Key header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Verbose diagnostic logging (to stderr)
    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_flag
    )]
    pub debug: bool,
}

impl Cli {
    /// Resolve the gateway configuration; both the URL and key are mandatory.
    pub fn client_config(&self) -> ClientResult<ClientConfig> {
        let base_url = required(self.api_base_url.as_deref(), "API_BASE_URL")?;
        let api_key = required(self.api_key.as_deref(), "API_KEY")?;
        ClientConfig::new(base_url, api_key)
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> ClientResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ClientError::config_error(format!("{name} environment variable is not set")))
}

/// Accepts `true`/`1`/`yes`/`on` (any case) as enabled; anything else disables.
fn parse_flag(raw: &str) -> Result<bool, String> {
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    ))
}
