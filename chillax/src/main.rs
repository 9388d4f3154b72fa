//! `chillax` MCP server over stdio.
//!
//! Stdout carries the protocol; all logging goes to stderr.

use std::sync::Arc;

use anyhow::Context;
use chillax::{ActivitySuggestionTool, Config, VERSION};
use chillax_mcp::McpServer;
use tracing_subscriber::EnvFilter;

const INSTRUCTIONS: &str = "Call get_activity_suggestion with a city name and how many days \
ahead (0-5) to get the forecast plus YouTube videos that suit the weather.";

fn init_tracing() {
    let filter = std::env::var("CHILLAX_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match std::env::var("CHILLAX_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing();
    tracing::info!(version = VERSION, ?config, "Starting chillax");

    let suggester = Arc::new(config.suggester()?);
    let server = McpServer::new("chillax-mcp-server", VERSION)
        .with_instructions(INSTRUCTIONS)
        .tool(ActivitySuggestionTool::new(suggester));

    server.run_stdio().await?;
    Ok(())
}
