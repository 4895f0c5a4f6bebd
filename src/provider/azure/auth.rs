//! # Azure Authentication
//!
//! Credential selection for Azure Resource Manager calls.

use crate::config::ProvisionerSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use azure_identity::{ManagedIdentityCredential, WorkloadIdentityCredential};
use std::sync::Arc;
use tracing::{debug, info};

/// Static bearer token for mock servers and contract tests
/// Returns a dummy token without attempting real Azure authentication
#[derive(Debug)]
pub struct MockTokenCredential;

#[async_trait]
impl TokenCredential for MockTokenCredential {
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::Result<AccessToken> {
        use typespec_client_core::time::{Duration, OffsetDateTime};

        Ok(AccessToken::new(
            Secret::new("test-token".to_string()),
            OffsetDateTime::now_utc() + Duration::seconds(3600),
        ))
    }
}

/// Build the credential used for ARM bearer tokens
///
/// - `mock_credentials` set: [`MockTokenCredential`]
/// - `azure_client_id` set: Workload Identity for that client id
/// - otherwise: Managed Identity
///
/// # Errors
/// Returns an error if the Azure Identity credential cannot be constructed
pub fn build_credential(settings: &ProvisionerSettings) -> Result<Arc<dyn TokenCredential>> {
    if settings.mock_credentials {
        debug!("Mock credentials enabled: using static Azure token");
        return Ok(Arc::new(MockTokenCredential));
    }

    let credential: Arc<dyn TokenCredential> = match &settings.azure_client_id {
        Some(client_id) => {
            info!(
                "Using Azure Workload Identity authentication with client ID: {}",
                client_id
            );
            let options = azure_identity::WorkloadIdentityCredentialOptions {
                client_id: Some(client_id.clone()),
                ..Default::default()
            };
            WorkloadIdentityCredential::new(Some(options))
                .context("Failed to create WorkloadIdentityCredential")?
        }
        None => {
            // Works automatically in Azure environments (AKS, App Service, DevOps agents)
            info!("No Azure client ID configured, using Managed Identity");
            ManagedIdentityCredential::new(None)
                .context("Failed to create ManagedIdentityCredential")?
        }
    };

    Ok(credential)
}
