//! Diagnostic logging setup.
//!
//! stdout carries MCP frames, so the subscriber always writes to stderr.

use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: [&str; 2] = ["huddle_recordings_mcp", "huddle_recordings_client"];

/// Build the filter: `RUST_LOG` first, then our crates at info (debug when `debug`).
pub fn env_filter(debug: bool) -> anyhow::Result<EnvFilter> {
    let level = if debug { "debug" } else { "info" };

    let mut filter = EnvFilter::from_default_env();
    for target in CRATE_TARGETS {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    Ok(filter)
}

/// Install the global stderr subscriber.
pub fn init(debug: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug)?)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
