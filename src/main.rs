//! # APIM Provisioner
//!
//! Command-line entry point. See [`cli`] for usage.

mod cli;

use anyhow::{Context, Result};
use apim_provisioner::config::{load_deployment_config, ProvisionerSettings};
use apim_provisioner::observability::{init_logging, metrics};
use clap::Parser;
use cli::Cli;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS connection is opened
    rustls::crypto::ring::default_provider()
        .install_default()
        .unwrap_or_else(|_| panic!("Failed to install rustls crypto provider"));

    let cli = Cli::parse();
    let settings = ProvisionerSettings::from_env();
    init_logging(&settings);
    metrics::register_metrics()?;

    let config = load_deployment_config(&cli.config)?;
    info!(
        "Loaded deployment for service {} (gateway {})",
        config.service_name, config.gateway_service_name
    );

    let orchestrator = cli::build_orchestrator(config, &settings)
        .context("Failed to create Azure Resource Manager clients")?;
    let result = cli::run(&cli.command, &orchestrator, &settings).await;

    if cli.print_metrics {
        eprintln!("{}", metrics::render_metrics()?);
    }

    result
}
