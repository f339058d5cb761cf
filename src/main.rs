//! payroll-engine server entry point.
//!
//! Loads a rate table, then serves the calculation API over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use payroll_engine::ENGINE_VERSION;
use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

/// Serve per-period net-pay calculations over HTTP.
///
/// Log verbosity is controlled with `RUST_LOG` (default `info`).
#[derive(Parser, Debug)]
#[command(name = "payroll-engine")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the rate table YAML files
    #[arg(short, long, default_value = "./config/us_2024")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load rate table from {}", args.config.display()))?;
    let rate_table = loader.into_rate_table();
    info!(
        version = ENGINE_VERSION,
        tax_year = rate_table.tax_year(),
        state = %rate_table.state().code,
        config = %args.config.display(),
        "Rate table loaded"
    );

    let app = create_router(AppState::new(rate_table));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("payroll-engine listening on http://{}", args.bind);

    axum::serve(listener, app).await.context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
