//! # Provider Modules
//!
//! Capability traits for the remote collaborators the orchestrator drives,
//! and their Azure Resource Manager implementations.
//!
//! - `ComputeAppResolver` resolves the Function App and its master key
//! - `ResourceClient<R>` reads and upserts one gateway resource kind
//! - `GatewayServiceClient` reads the gateway service itself
//!
//! Every method returns [`ApimError`] so the orchestrator can pass faults
//! through untouched.

use crate::error::ApimError;
use crate::model::{
    ApiManagementService, ApiResource, BackendResource, ComputeApp, MasterKey, PropertyResource,
};
use async_trait::async_trait;

/// Resolves the compute app fronted by the gateway
#[async_trait]
pub trait ComputeAppResolver: Send + Sync {
    /// Look up the Function App descriptor (id, name, location, host name)
    async fn resolve_app(&self) -> Result<ComputeApp, ApimError>;

    /// Look up the host-level master key of the Function App
    async fn resolve_master_key(&self) -> Result<MasterKey, ApimError>;
}

/// Idempotent read/upsert of one resource kind inside a gateway service
#[async_trait]
pub trait ResourceClient<R: Send + Sync>: Send + Sync {
    /// Read a resource
    ///
    /// Fails with [`ApimError::NotFound`] when the resource does not exist
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
        resource_id: &str,
    ) -> Result<R, ApimError>;

    /// Create the resource or replace it with `descriptor`
    ///
    /// Returns the resource as stored by the remote side
    async fn create_or_update(
        &self,
        resource_group: &str,
        service_name: &str,
        resource_id: &str,
        descriptor: &R,
    ) -> Result<R, ApimError>;
}

/// Reads the gateway service resource
#[async_trait]
pub trait GatewayServiceClient: Send + Sync {
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
    ) -> Result<ApiManagementService, ApimError>;
}

/// Client for API resources
pub type ApiClient = dyn ResourceClient<ApiResource>;
/// Client for backend resources
pub type BackendClient = dyn ResourceClient<BackendResource>;
/// Client for named-value property resources
pub type PropertyClient = dyn ResourceClient<PropertyResource>;

// Common utilities shared across providers
pub mod common;

// Provider implementations
pub mod azure;
