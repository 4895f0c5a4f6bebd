//! # Function App Resolver
//!
//! Resolves the Function App descriptor and its host master key through ARM.
//!
//! - `GET  .../Microsoft.Web/sites/{app}` for id, name, location and host name
//! - `POST .../Microsoft.Web/sites/{app}/host/default/listkeys` for the master key

use super::arm::ArmClient;
use super::paths::ArmPath;
use crate::error::ApimError;
use crate::model::{ComputeApp, MasterKey};
use crate::provider::common::OperationTracker;
use crate::provider::ComputeAppResolver;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{field, info_span, Instrument};

const WEB_PROVIDER: &str = "Microsoft.Web";

#[derive(Debug, Deserialize)]
struct SiteEnvelope {
    id: String,
    name: String,
    location: String,
    properties: SiteProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteProperties {
    default_host_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HostKeys {
    #[serde(default)]
    master_key: Option<String>,
}

/// Resolves a Function App within a resource group
#[derive(Debug)]
pub struct ArmFunctionAppResolver {
    arm: Arc<ArmClient>,
    resource_group: String,
    app_name: String,
    api_version: String,
}

impl ArmFunctionAppResolver {
    pub fn new(
        arm: Arc<ArmClient>,
        resource_group: impl Into<String>,
        app_name: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            arm,
            resource_group: resource_group.into(),
            app_name: app_name.into(),
            api_version: api_version.into(),
        }
    }

    fn site_path(&self) -> ArmPath {
        ArmPath::new(self.arm.subscription_id(), &self.resource_group)
            .provider(WEB_PROVIDER)
            .resource("sites", &self.app_name)
    }
}

#[async_trait]
impl ComputeAppResolver for ArmFunctionAppResolver {
    async fn resolve_app(&self) -> Result<ComputeApp, ApimError> {
        let span = info_span!(
            "azure.web.site.get",
            app.name = %self.app_name,
            operation.success = field::Empty,
            operation.found = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let tracker = OperationTracker::new(span.clone(), "function_app", "get");
        let path = self.site_path().build();
        let label = format!("sites/{}", self.app_name);

        async move {
            let result = self
                .arm
                .get_json::<SiteEnvelope>(&path, &self.api_version, &label)
                .await
                .map(|site| ComputeApp {
                    id: site.id,
                    name: site.name,
                    location: site.location,
                    default_host_name: site.properties.default_host_name,
                });
            tracker.finish(result)
        }
        .instrument(span)
        .await
    }

    async fn resolve_master_key(&self) -> Result<MasterKey, ApimError> {
        let span = info_span!(
            "azure.web.host.listkeys",
            app.name = %self.app_name,
            operation.success = field::Empty,
            operation.found = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let tracker = OperationTracker::new(span.clone(), "function_app", "list_keys");
        let path = self
            .site_path()
            .action("host")
            .action("default")
            .action("listkeys")
            .build();
        let label = format!("sites/{}/host/default", self.app_name);

        async move {
            let result = self
                .arm
                .post_action::<HostKeys>(&path, &self.api_version, &label)
                .await
                .and_then(|keys| {
                    keys.master_key
                        .map(MasterKey::new)
                        .ok_or_else(|| ApimError::NotFound {
                            resource: label.clone(),
                        })
                });
            tracker.finish(result)
        }
        .instrument(span)
        .await
    }
}
