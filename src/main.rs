use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use rmcp::{ServiceExt, transport::stdio};
use ramp_dev_mcp_rs::feedback::{DEFAULT_FEEDBACK_BASE_URL, FeedbackClient};
use ramp_dev_mcp_rs::knowledge::KnowledgeBase;
use ramp_dev_mcp_rs::server::RampDocs;
use clap::Parser;

#[cfg(feature = "trace")]
use tracing_subscriber::{EnvFilter};

#[derive(Parser)]
struct Cli {
    /// Directory holding `developer-api/` guides and `developer-api.json`
    #[clap(long, env = "RAMP_MCP_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// Guides directory (defaults to `<data-dir>/developer-api`)
    #[clap(long, env = "RAMP_MCP_GUIDES_DIR")]
    guides_dir: Option<PathBuf>,
    /// OpenAPI JSON document (defaults to `<data-dir>/developer-api.json`)
    #[clap(long, env = "RAMP_MCP_OPENAPI_SPEC")]
    openapi_spec: Option<PathBuf>,
    /// Base URL of the feedback API
    #[clap(long, env = "RAMP_MCP_FEEDBACK_BASE_URL", default_value = DEFAULT_FEEDBACK_BASE_URL)]
    feedback_base_url: String,
    /// Log file; stdout carries the MCP protocol
    #[clap(long, env = "RAMP_MCP_LOG_FILE", default_value = "server.log")]
    log_file: PathBuf,
}

/// You can inspect the server using the Model Context Protocol Inspector.
/// npx @modelcontextprotocol/inspector cargo run -p ramp-dev-mcp-rs

#[tokio::main]
async fn main() -> Result<()> {
    // Get command line arguments
    let args = Cli::parse();

    #[cfg(feature = "trace")]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_writer(std::fs::File::create(&args.log_file)?)
        .with_ansi(false)
        .init();

    tracing::info!("Starting MCP server");

    let guides_dir = args
        .guides_dir
        .unwrap_or_else(|| args.data_dir.join("developer-api"));
    let openapi_spec = args
        .openapi_spec
        .unwrap_or_else(|| args.data_dir.join("developer-api.json"));

    let (knowledge, report) = KnowledgeBase::load(&guides_dir, &openapi_spec)
        .with_context(|| format!("failed to load knowledge base from {}", guides_dir.display()))?;
    tracing::info!(
        guides = report.loaded,
        skipped = report.skipped.len(),
        endpoints = knowledge.openapi().len(),
        "Knowledge base ready"
    );

    let feedback = FeedbackClient::new(args.feedback_base_url)?;

    let service = RampDocs::new(Arc::new(knowledge), feedback)
        .serve(stdio()).await.inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
