//! librenms-mcp: MCP server for the LibreNMS REST API
//!
//! Configuration comes from the environment (optionally a `.env` file):
//!   LIBRENMS_URL, LIBRENMS_TOKEN, LIBRENMS_VERIFY_SSL, LIBRENMS_TIMEOUT,
//!   READ_ONLY_MODE, RATE_LIMIT_ENABLED, RATE_LIMIT_MAX_REQUESTS,
//!   RATE_LIMIT_WINDOW_MINUTES, LOG_LEVEL
//!
//! Usage:
//!   librenms-mcp                      # stdio
//!   librenms-mcp --read-only          # hide and reject every mutating tool

use anyhow::Result;
use clap::Parser;
use lnms_core::config::load_environment;
use lnms_core::ConnectionConfig;
use lnms_mcp::transport::{StdioTransport, Transport};
use lnms_mcp::{McpServer, McpServerConfig};
use lnms_tools::Pipeline;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "librenms-mcp")]
#[command(about = "MCP server for the LibreNMS REST API", version)]
struct Cli {
    /// Reject mutating operations regardless of READ_ONLY_MODE
    #[arg(long)]
    read_only: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Server name override
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before clap, so LOG_LEVEL from .env is seen
    let env_file = load_environment();
    let cli = Cli::parse();

    // stderr: stdout carries the protocol
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(cli.log_level.to_lowercase()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = env_file {
        info!(path = %path, "Loaded environment file");
    }

    let mut config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid LibreNMS configuration");
            std::process::exit(1);
        }
    };
    if cli.read_only {
        config.read_only_mode = true;
    }
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid LibreNMS configuration");
        std::process::exit(1);
    }

    info!(
        url = %config.base_url,
        read_only = config.read_only_mode,
        rate_limit = config.rate_limit_enabled,
        "Starting LibreNMS MCP server"
    );

    let pipeline = Arc::new(Pipeline::from_config(Arc::new(config))?);
    let server = Arc::new(McpServer::new(
        McpServerConfig {
            name: cli.name,
            ..Default::default()
        },
        pipeline,
    ));

    StdioTransport::new().serve(server).await
}
