//! # Provisioner Settings
//!
//! Process-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_APIM_API_VERSION, DEFAULT_ARM_ENDPOINT, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_WEB_API_VERSION,
};
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Provisioner-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ProvisionerSettings {
    /// Azure subscription that owns the resource group
    pub subscription_id: Option<String>,
    /// Azure Resource Manager endpoint
    /// Point this at a mock server for contract testing
    pub arm_endpoint: String,
    /// API version for `Microsoft.ApiManagement` requests
    pub apim_api_version: String,
    /// API version for `Microsoft.Web` requests
    pub web_api_version: String,
    /// Attempts made by callers that opt into retries
    pub retry_max_attempts: u32,
    /// Fixed delay between retry attempts (milliseconds)
    pub retry_delay_ms: u64,
    /// Workload Identity client id; Managed Identity is used when unset
    pub azure_client_id: Option<String>,
    /// Use a static bearer token instead of Azure Identity
    pub mock_credentials: bool,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
}

impl Default for ProvisionerSettings {
    fn default() -> Self {
        Self {
            subscription_id: None,
            arm_endpoint: DEFAULT_ARM_ENDPOINT.to_string(),
            apim_api_version: DEFAULT_APIM_API_VERSION.to_string(),
            web_api_version: DEFAULT_WEB_API_VERSION.to_string(),
            retry_max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            azure_client_id: None,
            mock_credentials: false,
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl ProvisionerSettings {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            subscription_id: env_var_opt("AZURE_SUBSCRIPTION_ID"),
            arm_endpoint: env_var_or_default_str("ARM_ENDPOINT", DEFAULT_ARM_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            apim_api_version: env_var_or_default_str("APIM_API_VERSION", DEFAULT_APIM_API_VERSION),
            web_api_version: env_var_or_default_str("WEB_API_VERSION", DEFAULT_WEB_API_VERSION),
            retry_max_attempts: env_var_or_default("RETRY_MAX_ATTEMPTS", DEFAULT_RETRY_MAX_ATTEMPTS),
            retry_delay_ms: env_var_or_default("RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS),
            azure_client_id: env_var_opt("AZURE_CLIENT_ID"),
            mock_credentials: env_var_or_default_bool("MOCK_CREDENTIALS", false),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
        }
    }

    /// Retry policy for callers that wrap remote work
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a non-empty environment variable
fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
