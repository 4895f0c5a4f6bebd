use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The gateway's record of the upstream a published API forwards to
///
/// `tls` and `proxy` are passed through to the gateway as given, so any
/// field the gateway understands (e.g. `certificateIds`) survives.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendResource {
    pub credentials: BackendCredentials,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub protocol: String,
    pub resource_id: String,
    pub url: String,
}

/// Credentials the gateway attaches when calling the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCredentials {
    /// Header name to templated named-value references, e.g. `{{svc-key}}`
    #[serde(default)]
    pub header: BTreeMap<String, Vec<String>>,
}

impl std::fmt::Debug for BackendResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendResource")
            .field("credentials", &self.credentials)
            .field("title", &self.title)
            .field("tls", &self.tls)
            .field("proxy", &redact_proxy(self.proxy.as_ref()))
            .field("description", &self.description)
            .field("protocol", &self.protocol)
            .field("resource_id", &self.resource_id)
            .field("url", &self.url)
            .finish()
    }
}

/// Proxy settings for `Debug` output: the URL only, credentials withheld
pub(crate) fn redact_proxy(proxy: Option<&Value>) -> Option<&str> {
    proxy.map(|p| p.get("url").and_then(Value::as_str).unwrap_or("***"))
}
