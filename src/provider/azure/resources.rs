//! # API Management Resource Clients
//!
//! One generic ARM client, specialised per resource kind:
//!
//! - [`ArmApiClient`] for `service/{svc}/apis/{api}`
//! - [`ArmBackendClient`] for `service/{svc}/backends/{backend}`
//! - [`ArmPropertyClient`] for `service/{svc}/properties/{property}`
//!
//! Each kind maps its flat domain type to and from the ARM
//! `{ id, name, properties }` envelope.

use super::arm::ArmClient;
use super::paths::ArmPath;
use crate::error::ApimError;
use crate::model::{ApiResource, BackendResource, PropertyResource};
use crate::provider::common::OperationTracker;
use crate::provider::ResourceClient;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{field, info, info_span, Instrument};

pub(crate) const APIM_PROVIDER: &str = "Microsoft.ApiManagement";

/// ARM resource envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmEnvelope<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: P,
}

impl<P> ArmEnvelope<P> {
    /// Request body for a PUT: properties only
    pub fn for_upsert(properties: P) -> Self {
        Self {
            id: None,
            name: None,
            properties,
        }
    }
}

/// A resource collection inside an API Management service
pub trait ArmResourceKind: Send + Sync + 'static {
    type Resource: Send + Sync;
    type Properties: Serialize + DeserializeOwned + Send + Sync;

    /// Collection segment under the service, e.g. `apis`
    const COLLECTION: &'static str;
    /// Short label for spans and metrics
    const LABEL: &'static str;

    fn to_properties(resource: &Self::Resource) -> Self::Properties;

    fn from_envelope(resource_id: &str, envelope: ArmEnvelope<Self::Properties>) -> Self::Resource;
}

/// `apis` collection
#[derive(Debug)]
pub struct Apis;

/// `backends` collection
#[derive(Debug)]
pub struct Backends;

/// `properties` (named values) collection
#[derive(Debug)]
pub struct Properties;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_current: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subscription_required: Option<bool>,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    path: String,
    #[serde(default)]
    protocols: BTreeSet<String>,
}

impl ArmResourceKind for Apis {
    type Resource = ApiResource;
    type Properties = ApiProperties;

    const COLLECTION: &'static str = "apis";
    const LABEL: &'static str = "api";

    fn to_properties(resource: &ApiResource) -> ApiProperties {
        ApiProperties {
            is_current: Some(resource.is_current),
            subscription_required: Some(resource.subscription_required),
            display_name: resource.display_name.clone(),
            description: resource.description.clone(),
            path: resource.path.clone(),
            protocols: resource.protocols.clone(),
        }
    }

    fn from_envelope(resource_id: &str, envelope: ArmEnvelope<ApiProperties>) -> ApiResource {
        let props = envelope.properties;
        ApiResource {
            id: envelope.id,
            name: envelope.name.unwrap_or_else(|| resource_id.to_string()),
            is_current: props.is_current.unwrap_or_default(),
            subscription_required: props.subscription_required.unwrap_or_default(),
            display_name: props.display_name,
            description: props.description,
            path: props.path,
            protocols: props.protocols,
        }
    }
}

impl ArmResourceKind for Backends {
    type Resource = BackendResource;
    type Properties = BackendResource;

    const COLLECTION: &'static str = "backends";
    const LABEL: &'static str = "backend";

    fn to_properties(resource: &BackendResource) -> BackendResource {
        resource.clone()
    }

    fn from_envelope(_resource_id: &str, envelope: ArmEnvelope<BackendResource>) -> BackendResource {
        envelope.properties
    }
}

impl ArmResourceKind for Properties {
    type Resource = PropertyResource;
    type Properties = PropertyResource;

    const COLLECTION: &'static str = "properties";
    const LABEL: &'static str = "property";

    fn to_properties(resource: &PropertyResource) -> PropertyResource {
        resource.clone()
    }

    fn from_envelope(
        _resource_id: &str,
        envelope: ArmEnvelope<PropertyResource>,
    ) -> PropertyResource {
        envelope.properties
    }
}

/// ARM client for one API Management resource collection
#[derive(Debug)]
pub struct ArmResourceClient<K> {
    arm: Arc<ArmClient>,
    api_version: String,
    _kind: PhantomData<K>,
}

pub type ArmApiClient = ArmResourceClient<Apis>;
pub type ArmBackendClient = ArmResourceClient<Backends>;
pub type ArmPropertyClient = ArmResourceClient<Properties>;

impl<K: ArmResourceKind> ArmResourceClient<K> {
    pub fn new(arm: Arc<ArmClient>, api_version: impl Into<String>) -> Self {
        Self {
            arm,
            api_version: api_version.into(),
            _kind: PhantomData,
        }
    }

    fn path(&self, resource_group: &str, service_name: &str, resource_id: &str) -> String {
        ArmPath::new(self.arm.subscription_id(), resource_group)
            .provider(APIM_PROVIDER)
            .resource("service", service_name)
            .resource(K::COLLECTION, resource_id)
            .build()
    }
}

#[async_trait]
impl<K: ArmResourceKind> ResourceClient<K::Resource> for ArmResourceClient<K> {
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
        resource_id: &str,
    ) -> Result<K::Resource, ApimError> {
        let span = tracing::debug_span!(
            "azure.apim.resource.get",
            resource.kind = K::LABEL,
            resource.name = resource_id,
            service.name = service_name,
            operation.success = field::Empty,
            operation.found = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let tracker = OperationTracker::new(span.clone(), K::LABEL, "get");
        let path = self.path(resource_group, service_name, resource_id);
        let label = format!("{}/{}", K::COLLECTION, resource_id);

        async move {
            let result = self
                .arm
                .get_json::<ArmEnvelope<K::Properties>>(&path, &self.api_version, &label)
                .await
                .map(|envelope| K::from_envelope(resource_id, envelope));
            tracker.finish(result)
        }
        .instrument(span)
        .await
    }

    async fn create_or_update(
        &self,
        resource_group: &str,
        service_name: &str,
        resource_id: &str,
        descriptor: &K::Resource,
    ) -> Result<K::Resource, ApimError> {
        let span = info_span!(
            "azure.apim.resource.create_or_update",
            resource.kind = K::LABEL,
            resource.name = resource_id,
            service.name = service_name,
            operation.success = field::Empty,
            operation.found = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let tracker = OperationTracker::new(span.clone(), K::LABEL, "create_or_update");
        let path = self.path(resource_group, service_name, resource_id);
        let label = format!("{}/{}", K::COLLECTION, resource_id);
        let body = ArmEnvelope::for_upsert(K::to_properties(descriptor));

        async move {
            info!(
                resource_kind = K::LABEL,
                resource_name = resource_id,
                service_name = service_name,
                "Creating/updating API Management {}: {}",
                K::LABEL,
                resource_id
            );
            let result = self
                .arm
                .put_json::<_, ArmEnvelope<K::Properties>>(&path, &self.api_version, &label, &body)
                .await
                .map(|envelope| K::from_envelope(resource_id, envelope));
            tracker.finish(result)
        }
        .instrument(span)
        .await
    }
}
