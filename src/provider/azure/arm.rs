//! # Azure Resource Manager Client
//!
//! Thin JSON-over-HTTPS client for ARM.
//!
//! Attaches a bearer token from the configured `TokenCredential`, appends the
//! `api-version` query parameter and maps non-success statuses to
//! [`ApimError`].

use super::auth::build_credential;
use crate::config::ProvisionerSettings;
use crate::error::ApimError;
use anyhow::{Context, Result};
use azure_core::credentials::{TokenCredential, TokenRequestOptions};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Shared ARM transport used by every Azure resource client
pub struct ArmClient {
    http_client: Client,
    endpoint: String,
    subscription_id: String,
    credential: Arc<dyn TokenCredential>,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Create a client for `endpoint` (no trailing slash required)
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        endpoint: impl Into<String>,
        subscription_id: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            subscription_id: subscription_id.into(),
            credential,
        })
    }

    /// Create a client from process settings
    ///
    /// # Errors
    /// Returns an error if no subscription is configured or the credential
    /// cannot be constructed
    pub fn from_settings(settings: &ProvisionerSettings) -> Result<Self> {
        let subscription_id = settings
            .subscription_id
            .clone()
            .context("AZURE_SUBSCRIPTION_ID must be set to call Azure Resource Manager")?;
        let credential = build_credential(settings)?;
        Self::new(&settings.arm_endpoint, subscription_id, credential)
    }

    #[must_use]
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// GET `path` and decode the JSON body
    ///
    /// # Errors
    /// Returns [`ApimError::NotFound`] on 404, other variants on any other failure
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        resource: &str,
    ) -> Result<T, ApimError> {
        self.send::<(), T>(Method::GET, path, api_version, resource, None)
            .await
    }

    /// PUT `body` to `path` and decode the JSON response
    ///
    /// # Errors
    /// Returns an [`ApimError`] on any non-success status or transport failure
    pub async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        resource: &str,
        body: &B,
    ) -> Result<T, ApimError> {
        self.send(Method::PUT, path, api_version, resource, Some(body))
            .await
    }

    /// POST to an ARM action endpoint without a body
    ///
    /// # Errors
    /// Returns an [`ApimError`] on any non-success status or transport failure
    pub async fn post_action<T: DeserializeOwned>(
        &self,
        path: &str,
        api_version: &str,
        resource: &str,
    ) -> Result<T, ApimError> {
        self.send::<(), T>(Method::POST, path, api_version, resource, None)
            .await
    }

    async fn bearer_token(&self) -> Result<String, ApimError> {
        let scope = format!("{}/.default", self.endpoint);
        let options = Some(TokenRequestOptions::default());
        let token_response = self
            .credential
            .get_token(&[scope.as_str()], options)
            .await
            .map_err(|e| ApimError::Credential(e.to_string()))?;
        Ok(token_response.token.secret().to_string())
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        api_version: &str,
        resource: &str,
        body: Option<&B>,
    ) -> Result<T, ApimError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.endpoint, path);
        debug!("ARM {} {}", method, url);
        let is_post = method == Method::POST;

        let mut request = self
            .http_client
            .request(method, &url)
            .query(&[("api-version", api_version)])
            .header("Authorization", format!("Bearer {token}"));

        if let Some(body) = body {
            request = request.json(body);
        } else if is_post {
            // ARM rejects body-less POSTs without a content length
            request = request.header("Content-Length", "0");
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApimError::from_response(status.as_u16(), resource, &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}
