use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gatekeeper_server::logging::init_logging;
use gatekeeper_server::shutdown::shutdown_signal;
use gatekeeper_server::{AppConfig, build_router};
use permission_registry::{InMemoryPermissionStore, PermissionRegistry};

#[derive(Parser, Debug)]
#[command(name = "gatekeeper-server", about = "Multi-tenant request authentication gatekeeper")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(cli.verbose, &config.logging)?;

    let registry = PermissionRegistry::install(Arc::new(InMemoryPermissionStore::new()));
    let router = build_router(&config, registry).await?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "gatekeeper listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}
