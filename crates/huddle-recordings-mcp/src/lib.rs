//! Huddle recordings MCP server library.
//!
//! Provides the [`server::HuddleRecordingsServer`] MCP server handler and tool
//! parameter/response types. Used by the `huddle-recordings-mcp` binary and
//! available for integration testing.

pub mod cli;
pub mod logging;
pub mod server;
pub mod tools;
