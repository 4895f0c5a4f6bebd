//! # API Management Service Client
//!
//! Reads the gateway service resource itself.

use super::arm::ArmClient;
use super::paths::ArmPath;
use super::resources::APIM_PROVIDER;
use crate::error::ApimError;
use crate::model::{ApiManagementService, ServiceSku};
use crate::provider::common::OperationTracker;
use crate::provider::GatewayServiceClient;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{field, Instrument};

#[derive(Debug, Deserialize)]
struct ServiceEnvelope {
    #[serde(default)]
    id: Option<String>,
    name: String,
    location: String,
    #[serde(default)]
    sku: Option<ServiceSku>,
    #[serde(default)]
    properties: ServiceProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceProperties {
    #[serde(default)]
    gateway_url: Option<String>,
}

impl From<ServiceEnvelope> for ApiManagementService {
    fn from(envelope: ServiceEnvelope) -> Self {
        Self {
            id: envelope.id,
            name: envelope.name,
            location: envelope.location,
            sku: envelope.sku,
            gateway_url: envelope.properties.gateway_url,
        }
    }
}

/// ARM client for `Microsoft.ApiManagement/service`
#[derive(Debug)]
pub struct ArmGatewayServiceClient {
    arm: Arc<ArmClient>,
    api_version: String,
}

impl ArmGatewayServiceClient {
    pub fn new(arm: Arc<ArmClient>, api_version: impl Into<String>) -> Self {
        Self {
            arm,
            api_version: api_version.into(),
        }
    }
}

#[async_trait]
impl GatewayServiceClient for ArmGatewayServiceClient {
    async fn get(
        &self,
        resource_group: &str,
        service_name: &str,
    ) -> Result<ApiManagementService, ApimError> {
        let span = tracing::debug_span!(
            "azure.apim.service.get",
            service.name = service_name,
            operation.success = field::Empty,
            operation.found = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let tracker = OperationTracker::new(span.clone(), "service", "get");
        let path = ArmPath::new(self.arm.subscription_id(), resource_group)
            .provider(APIM_PROVIDER)
            .resource("service", service_name)
            .build();
        let label = format!("service/{service_name}");

        async move {
            let result = self
                .arm
                .get_json::<ServiceEnvelope>(&path, &self.api_version, &label)
                .await
                .map(ApiManagementService::from);
            tracker.finish(result)
        }
        .instrument(span)
        .await
    }
}
