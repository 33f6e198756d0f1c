//! turnpike: agent server for engine-driven games
//!
//! Listens on the given port for turns on `/server` and answers liveness
//! probes on `/health`. Runs until interrupted.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use turnpike_server::{IdleStrategy, TurnServer, shutdown_signal};

const USAGE: &str = "usage: turnpike <port>";

fn parse_port(args: &[String]) -> Result<u16> {
    let raw = args.get(1).context("missing port argument")?;
    raw.parse::<u16>()
        .with_context(|| format!("invalid port: {}", raw))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let port = match parse_port(&args) {
        Ok(port) => port,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    let server = match TurnServer::new(IdleStrategy).start(port).await {
        Ok(server) => server,
        // Already logged by the listener
        Err(_) => return Ok(ExitCode::FAILURE),
    };

    server.run_until(shutdown_signal()).await;
    info!("turnpike shutting down");
    Ok(ExitCode::SUCCESS)
}
