use cargo_mcp_server::config::ToolConfig;
use cargo_mcp_server::server::CargoServer;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ToolConfig::from_env();
    tracing::info!(
        program = %config.program,
        marker = %config.marker_file,
        "starting cargo MCP server"
    );

    CargoServer::new(config).serve(stdio()).await?.waiting().await?;
    Ok(())
}
