//! Document Gateway - command-line entry point
//!
//! Opens one gateway per invocation, runs a single CRUD command and closes it.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use document_gateway::{cli::Cli, commands, config::GatewayConfig};

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    init_tracing(cli.verbose);

    let mut config = GatewayConfig::from_env();
    if let Some(uri) = cli.uri {
        config = config.with_uri(uri);
    }
    if let Some(secs) = cli.timeout_secs {
        config.deadlines.operation_timeout_secs = secs;
    }
    tracing::debug!(?config, "Configuration loaded");

    if let Err(e) = commands::execute(cli.command, config).await {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
