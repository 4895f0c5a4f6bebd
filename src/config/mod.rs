//! # Configuration
//!
//! - `deployment`: the per-service deployment description, loaded from YAML
//! - `settings`: process-level settings loaded from environment variables

mod deployment;
mod settings;

pub use deployment::{
    load_deployment_config, ApiSpec, BackendSpec, DeploymentConfig, ResolvedBackendSpec,
};
pub use settings::ProvisionerSettings;
