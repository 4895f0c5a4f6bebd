//! # Command Line
//!
//! ```bash
//! # Create or update the API, backend and master key property
//! apim-provisioner --config deployment.yaml deploy
//!
//! # Show the API Management service
//! apim-provisioner --config deployment.yaml get
//!
//! # Show the published API
//! apim-provisioner --config deployment.yaml get-api
//! ```

use anyhow::{Context, Result};
use apim_provisioner::apim::ApiManagementOrchestrator;
use apim_provisioner::config::{DeploymentConfig, ProvisionerSettings};
use apim_provisioner::provider::azure::{
    ArmApiClient, ArmBackendClient, ArmClient, ArmFunctionAppResolver, ArmGatewayServiceClient,
    ArmPropertyClient,
};
use apim_provisioner::retry::run_with_retry;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    " ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Provision an Azure API Management API in front of a Function App
#[derive(Debug, Parser)]
#[command(name = "apim-provisioner", version = VERSION, long_about = None)]
pub struct Cli {
    /// Deployment configuration file (YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Print Prometheus metrics to stderr after the command completes
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update the API, its backend and the master key property
    Deploy,
    /// Show the API Management service
    Get,
    /// Show the published API
    GetApi,
}

/// Wire the Azure Resource Manager clients into an orchestrator
///
/// # Errors
/// Returns an error if the ARM client cannot be created
pub fn build_orchestrator(
    config: DeploymentConfig,
    settings: &ProvisionerSettings,
) -> Result<ApiManagementOrchestrator> {
    let arm = Arc::new(ArmClient::from_settings(settings)?);
    let apim_version = settings.apim_api_version.as_str();

    let resolver = Arc::new(ArmFunctionAppResolver::new(
        Arc::clone(&arm),
        config.resource_group.clone(),
        config.function_app_name().to_string(),
        settings.web_api_version.clone(),
    ));

    Ok(ApiManagementOrchestrator::new(
        config,
        resolver,
        Arc::new(ArmGatewayServiceClient::new(Arc::clone(&arm), apim_version)),
        Arc::new(ArmApiClient::new(Arc::clone(&arm), apim_version)),
        Arc::new(ArmBackendClient::new(Arc::clone(&arm), apim_version)),
        Arc::new(ArmPropertyClient::new(arm, apim_version)),
    ))
}

/// Execute one subcommand
///
/// # Errors
/// Returns the first remote failure, after retries for `deploy`
pub async fn run(
    command: &Commands,
    orchestrator: &ApiManagementOrchestrator,
    settings: &ProvisionerSettings,
) -> Result<()> {
    match command {
        Commands::Deploy => {
            let policy = settings.retry_policy();
            let api = run_with_retry(
                |attempt| async move {
                    if attempt > 1 {
                        info!("Retrying deployment (attempt {})", attempt);
                    }
                    orchestrator.deploy_api().await
                },
                &policy,
            )
            .await
            .context("Deployment failed")?;
            print_json(&api)
        }
        Commands::Get => {
            let name = &orchestrator.config().gateway_service_name;
            match orchestrator.get().await? {
                Some(service) => print_json(&service),
                None => {
                    println!("API Management service {name} not found");
                    Ok(())
                }
            }
        }
        Commands::GetApi => {
            let name = &orchestrator.config().api.name;
            match orchestrator.get_api().await? {
                Some(api) => print_json(&api),
                None => {
                    println!("API {name} not found");
                    Ok(())
                }
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
