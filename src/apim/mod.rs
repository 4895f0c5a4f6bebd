//! # API Management Orchestrator
//!
//! Reconciles one published API in front of a Function App:
//!
//! 1. Resolve the Function App and its master key (concurrently)
//! 2. Build the API, backend and property descriptors
//! 3. Upsert API, then backend, then property, stopping at the first failure
//!
//! Faults from collaborators are returned as received. Nothing is rolled
//! back; every upsert is idempotent so a repeated deploy converges.

pub mod descriptors;

pub use descriptors::{
    build_api_descriptor, build_backend_descriptor, build_property_descriptor,
    master_key_property_name,
};

use crate::config::{DeploymentConfig, ResolvedBackendSpec};
use crate::error::ApimError;
use crate::model::{ApiManagementService, ApiResource};
use crate::observability::metrics;
use crate::provider::{
    ApiClient, BackendClient, ComputeAppResolver, GatewayServiceClient, PropertyClient,
};
use futures::future::try_join;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Drives the gateway resources for a single deployment configuration
pub struct ApiManagementOrchestrator {
    config: DeploymentConfig,
    resolver: Arc<dyn ComputeAppResolver>,
    service_client: Arc<dyn GatewayServiceClient>,
    api_client: Arc<ApiClient>,
    backend_client: Arc<BackendClient>,
    property_client: Arc<PropertyClient>,
}

impl std::fmt::Debug for ApiManagementOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiManagementOrchestrator")
            .field("service_name", &self.config.service_name)
            .field("gateway_service_name", &self.config.gateway_service_name)
            .finish_non_exhaustive()
    }
}

impl ApiManagementOrchestrator {
    #[must_use]
    pub fn new(
        config: DeploymentConfig,
        resolver: Arc<dyn ComputeAppResolver>,
        service_client: Arc<dyn GatewayServiceClient>,
        api_client: Arc<ApiClient>,
        backend_client: Arc<BackendClient>,
        property_client: Arc<PropertyClient>,
    ) -> Self {
        Self {
            config,
            resolver,
            service_client,
            api_client,
            backend_client,
            property_client,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    /// Read the gateway service, `None` if it does not exist
    ///
    /// # Errors
    /// Any fault other than not-found, unmodified
    pub async fn get(&self) -> Result<Option<ApiManagementService>, ApimError> {
        let result = self
            .service_client
            .get(&self.config.resource_group, &self.config.gateway_service_name)
            .await;
        not_found_as_none(result)
    }

    /// Read the configured API, `None` if it does not exist
    ///
    /// # Errors
    /// Any fault other than not-found, unmodified
    pub async fn get_api(&self) -> Result<Option<ApiResource>, ApimError> {
        let result = self
            .api_client
            .get(
                &self.config.resource_group,
                &self.config.gateway_service_name,
                &self.config.api.name,
            )
            .await;
        not_found_as_none(result)
    }

    /// Create or update the API, its backend and the master key property
    ///
    /// Returns the API exactly as the gateway stored it.
    ///
    /// # Errors
    /// The first resolver or upsert fault, unmodified. Resources upserted
    /// before the fault are left in place.
    pub async fn deploy_api(&self) -> Result<ApiResource, ApimError> {
        let span = info_span!(
            "apim.deploy_api",
            service.name = %self.config.service_name,
            gateway.name = %self.config.gateway_service_name,
            api.name = %self.config.api.name,
        );

        async {
            metrics::increment_deployments();
            let result = self.deploy_resources().await;
            match &result {
                Ok(api) => info!(
                    "Deployed API {} to gateway {}",
                    api.name, self.config.gateway_service_name
                ),
                Err(e) => {
                    metrics::increment_deployment_errors();
                    warn!("API deployment failed: {}", e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn deploy_resources(&self) -> Result<ApiResource, ApimError> {
        let (app, master_key) = try_join(
            self.resolver.resolve_app(),
            self.resolver.resolve_master_key(),
        )
        .await?;
        debug!(
            "Resolved Function App {} at {}",
            app.name, app.default_host_name
        );

        let service_name = &self.config.service_name;
        let backend_spec = ResolvedBackendSpec::new(&self.config, &app);
        let api = build_api_descriptor(&self.config.api);
        let backend = build_backend_descriptor(service_name, &backend_spec, &app);
        let property = build_property_descriptor(service_name, &master_key);

        let resource_group = &self.config.resource_group;
        let gateway = &self.config.gateway_service_name;

        let deployed = self
            .api_client
            .create_or_update(resource_group, gateway, &api.name, &api)
            .await?;
        self.backend_client
            .create_or_update(resource_group, gateway, &backend_spec.name, &backend)
            .await?;
        self.property_client
            .create_or_update(resource_group, gateway, &property.display_name, &property)
            .await?;

        Ok(deployed)
    }
}

fn not_found_as_none<T>(result: Result<T, ApimError>) -> Result<Option<T>, ApimError> {
    match result {
        Ok(resource) => Ok(Some(resource)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
