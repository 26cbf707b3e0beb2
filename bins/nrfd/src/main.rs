//! NRF daemon entry point.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use nrfd::{Nrf, NrfConf, SbiServer};

/// NRF - 5G Network Repository Function
#[derive(Parser, Debug)]
#[command(name = "nrfd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "5G Core Network Repository Function", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'e', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&args.log_level),
    )
    .init();

    log::info!("NRF v{} starting", env!("CARGO_PKG_VERSION"));

    let conf = match &args.config {
        Some(path) => {
            log::info!("loading configuration from {path}");
            NrfConf::load(path)?
        }
        None => {
            log::info!("no configuration file given, using defaults");
            NrfConf::default()
        }
    };

    let nrf = Arc::new(Nrf::new(conf)?);
    let server = SbiServer::new(nrf);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    server.stop().await;

    Ok(())
}
