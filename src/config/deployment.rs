//! # Deployment Configuration
//!
//! The read-only description of what to provision: which gateway, which API,
//! and optional overrides for the backend record.

use crate::constants::DEFAULT_BACKEND_PROTOCOL;
use crate::model::{redact_proxy, ComputeApp};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Deployment configuration for one service
///
/// # Example
///
/// ```yaml
/// serviceName: test-sls
/// resourceGroup: test-sls-rg
/// location: West US
/// gatewayServiceName: test-apim
/// api:
///   name: test-api
///   subscriptionRequired: false
///   displayName: Test API
///   description: Functions exposed through API Management
///   protocols: [https]
///   path: test-api
/// backend:
///   protocol: http
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub service_name: String,
    pub resource_group: String,
    pub location: String,
    pub gateway_service_name: String,
    pub api: ApiSpec,
    #[serde(default)]
    pub backend: Option<BackendSpec>,
    /// Function App to front, defaults to the service name
    #[serde(default)]
    pub function_app: Option<String>,
}

/// Published API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    pub name: String,
    #[serde(default)]
    pub subscription_required: bool,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub protocols: BTreeSet<String>,
    pub path: String,
}

/// Optional backend overrides
///
/// `tls` and `proxy` are gateway JSON objects handed to the backend as-is.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tls: Option<Value>,
    #[serde(default)]
    pub proxy: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
}

/// Backend overrides with every default applied
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedBackendSpec {
    /// Identifier the backend is upserted under
    pub name: String,
    pub title: String,
    pub tls: Option<Value>,
    pub proxy: Option<Value>,
    pub description: Option<String>,
    pub protocol: String,
}

impl std::fmt::Debug for BackendSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSpec")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("tls", &self.tls)
            .field("proxy", &redact_proxy(self.proxy.as_ref()))
            .field("description", &self.description)
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl std::fmt::Debug for ResolvedBackendSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedBackendSpec")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("tls", &self.tls)
            .field("proxy", &redact_proxy(self.proxy.as_ref()))
            .field("description", &self.description)
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl ResolvedBackendSpec {
    /// Apply defaults: name to the service name, title to the compute app
    /// name, protocol to `http`.
    #[must_use]
    pub fn new(config: &DeploymentConfig, app: &ComputeApp) -> Self {
        let spec = config.backend.clone().unwrap_or_default();
        Self {
            name: spec.name.unwrap_or_else(|| config.service_name.clone()),
            title: spec.title.unwrap_or_else(|| app.name.clone()),
            tls: spec.tls,
            proxy: spec.proxy,
            description: spec.description,
            protocol: spec
                .protocol
                .unwrap_or_else(|| DEFAULT_BACKEND_PROTOCOL.to_string()),
        }
    }
}

impl DeploymentConfig {
    /// Name of the Function App this deployment fronts
    #[must_use]
    pub fn function_app_name(&self) -> &str {
        self.function_app.as_deref().unwrap_or(&self.service_name)
    }

    /// Reject configurations that cannot address a remote resource
    ///
    /// # Errors
    /// Returns an error naming the first missing or empty field
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("serviceName", &self.service_name),
            ("resourceGroup", &self.resource_group),
            ("gatewayServiceName", &self.gateway_service_name),
            ("api.name", &self.api.name),
            ("api.displayName", &self.api.display_name),
            ("api.path", &self.api.path),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("Deployment configuration field '{field}' must not be empty");
            }
        }

        if self.api.protocols.is_empty() {
            anyhow::bail!("Deployment configuration field 'api.protocols' must list at least one protocol");
        }

        if let Some(backend) = &self.backend {
            if backend.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                anyhow::bail!("Deployment configuration field 'backend.name' must not be empty when set");
            }
            for (field, value) in [("backend.tls", &backend.tls), ("backend.proxy", &backend.proxy)] {
                if value.as_ref().is_some_and(|v| !v.is_object()) {
                    anyhow::bail!("Deployment configuration field '{field}' must be a mapping");
                }
            }
        }

        Ok(())
    }
}

/// Read, parse and validate a YAML deployment configuration file
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or fails validation
pub fn load_deployment_config(path: &Path) -> Result<DeploymentConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read deployment configuration {}", path.display()))?;
    let config: DeploymentConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse deployment configuration {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
