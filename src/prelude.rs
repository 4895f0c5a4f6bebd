//! Common imports for embedding the provisioner.
//!
//! ```rust
//! use apim_provisioner::prelude::*;
//! ```

pub use crate::apim::ApiManagementOrchestrator;
pub use crate::config::{load_deployment_config, DeploymentConfig, ProvisionerSettings};
pub use crate::error::ApimError;
pub use crate::model::{
    ApiManagementService, ApiResource, BackendResource, ComputeApp, MasterKey, PropertyResource,
};
pub use crate::provider::{ComputeAppResolver, GatewayServiceClient, ResourceClient};
pub use crate::retry::{run_with_retry, RetryPolicy};
