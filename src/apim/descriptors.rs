//! # Descriptor Builders
//!
//! Pure functions turning configuration plus resolved compute metadata into
//! the resource descriptors submitted on deploy.

use crate::config::{ApiSpec, ResolvedBackendSpec};
use crate::constants::{
    BACKEND_RESOURCE_ID_PREFIX, FUNCTIONS_KEY_HEADER, FUNCTIONS_ROUTE_PREFIX,
    MASTER_KEY_PROPERTY_SUFFIX,
};
use crate::model::{
    ApiResource, BackendCredentials, BackendResource, ComputeApp, MasterKey, PropertyResource,
};
use std::collections::BTreeMap;
use zeroize::Zeroizing;

/// Display name of the property holding the master key, e.g. `test-sls-key`
#[must_use]
pub fn master_key_property_name(service_name: &str) -> String {
    format!("{service_name}{MASTER_KEY_PROPERTY_SUFFIX}")
}

/// API descriptor taken straight from configuration, always current
#[must_use]
pub fn build_api_descriptor(spec: &ApiSpec) -> ApiResource {
    ApiResource {
        id: None,
        name: spec.name.clone(),
        is_current: true,
        subscription_required: spec.subscription_required,
        display_name: spec.display_name.clone(),
        description: spec.description.clone(),
        path: spec.path.clone(),
        protocols: spec.protocols.clone(),
    }
}

/// Backend descriptor pointing at the Function App's `/api` route
///
/// Authenticates with the `x-functions-key` header templated from the
/// master key property.
#[must_use]
pub fn build_backend_descriptor(
    service_name: &str,
    backend: &ResolvedBackendSpec,
    app: &ComputeApp,
) -> BackendResource {
    let key_reference = format!("{{{{{}}}}}", master_key_property_name(service_name));
    let mut header = BTreeMap::new();
    header.insert(FUNCTIONS_KEY_HEADER.to_string(), vec![key_reference]);

    BackendResource {
        credentials: BackendCredentials { header },
        title: backend.title.clone(),
        tls: backend.tls.clone(),
        proxy: backend.proxy.clone(),
        description: backend.description.clone(),
        protocol: backend.protocol.clone(),
        resource_id: format!("{BACKEND_RESOURCE_ID_PREFIX}{}", app.id),
        url: format!("https://{}{FUNCTIONS_ROUTE_PREFIX}", app.default_host_name),
    }
}

/// Secret property carrying the master key
#[must_use]
pub fn build_property_descriptor(service_name: &str, master_key: &MasterKey) -> PropertyResource {
    PropertyResource {
        display_name: master_key_property_name(service_name),
        secret: true,
        value: Zeroizing::new(master_key.expose().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> ComputeApp {
        ComputeApp {
            id: "/testapp1".to_string(),
            name: "testapp1".to_string(),
            location: "West US".to_string(),
            default_host_name: "testsite.azurewebsites.net".to_string(),
        }
    }

    fn resolved_backend() -> ResolvedBackendSpec {
        ResolvedBackendSpec {
            name: "test-sls".to_string(),
            title: "testapp1".to_string(),
            tls: None,
            proxy: None,
            description: None,
            protocol: "http".to_string(),
        }
    }

    #[test]
    fn test_api_descriptor_is_current() {
        let spec = ApiSpec {
            name: "test-api".to_string(),
            subscription_required: true,
            display_name: "Test API".to_string(),
            description: Some("Test API description".to_string()),
            protocols: ["https".to_string()].into_iter().collect(),
            path: "test-api".to_string(),
        };

        let api = build_api_descriptor(&spec);
        assert!(api.is_current);
        assert!(api.id.is_none());
        assert!(api.subscription_required);
        assert_eq!(api.display_name, "Test API");
        assert_eq!(api.path, "test-api");
    }

    #[test]
    fn test_backend_descriptor_targets_function_app() {
        let backend = build_backend_descriptor("test-sls", &resolved_backend(), &app());

        assert_eq!(backend.resource_id, "https://management.azure.com/testapp1");
        assert_eq!(backend.url, "https://testsite.azurewebsites.net/api");
        assert_eq!(backend.protocol, "http");
        assert_eq!(backend.title, "testapp1");
        assert_eq!(
            backend.credentials.header.get("x-functions-key"),
            Some(&vec!["{{test-sls-key}}".to_string()])
        );
        assert_eq!(backend.credentials.header.len(), 1);
    }

    #[test]
    fn test_backend_descriptor_keeps_overrides() {
        let mut spec = resolved_backend();
        spec.title = "Custom".to_string();
        spec.protocol = "soap".to_string();
        spec.tls = Some(json!({
            "validateCertificateChain": false,
            "certificateIds": ["cert-a"]
        }));

        let backend = build_backend_descriptor("test-sls", &spec, &app());
        assert_eq!(backend.title, "Custom");
        assert_eq!(backend.protocol, "soap");
        assert_eq!(backend.tls, spec.tls);
    }

    #[test]
    fn test_property_descriptor_is_secret() {
        let property = build_property_descriptor("test-sls", &MasterKey::new("ABC123"));
        assert_eq!(property.display_name, "test-sls-key");
        assert!(property.secret);
        assert_eq!(property.value.as_str(), "ABC123");
    }

    #[test]
    fn test_property_descriptor_holds_key_in_zeroizing_buffer() {
        fn wiped_on_drop(_: &Zeroizing<String>) {}

        let property = build_property_descriptor("test-sls", &MasterKey::new("ABC123"));
        wiped_on_drop(&property.value);
        assert!(!format!("{property:?}").contains("ABC123"));
    }
}
