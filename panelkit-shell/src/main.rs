//! panelkit shell
//!
//! Boots a panel from `panel.toml` and serves its shared props and page
//! objects over HTTP for an SPA front end.
//!
//! Usage:
//!   panelkit-shell --config panel.toml --port 8080

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use panelkit_host::{Panel, PanelConfig};
use panelkit_shell::build_router;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "panelkit-shell")]
#[command(about = "Serve panelkit navigation props and page objects")]
struct Args {
    /// Path to panel.toml (defaults to $PANELKIT_CONFIG, then ./panel.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("panelkit shell starting...");
    let config = match &args.config {
        Some(path) => PanelConfig::load_from(path),
        None => PanelConfig::load(),
    };

    let mut panel = Panel::new(config);
    let registered = panel.boot();
    panel
        .validate()
        .context("Registered entities failed validation")?;
    info!("Registered {} entities", registered);

    let app = build_router(Arc::new(panel));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!("HTTP API listening on port {}", args.port);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
