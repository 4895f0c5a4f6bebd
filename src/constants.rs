//! # Constants
//!
//! Shared constants used throughout the provisioner.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Azure Resource Manager endpoint for the public cloud
pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";

/// API version used for `Microsoft.ApiManagement` resources
pub const DEFAULT_APIM_API_VERSION: &str = "2019-01-01";

/// API version used for `Microsoft.Web` (Function App) resources
pub const DEFAULT_WEB_API_VERSION: &str = "2022-03-01";

/// Prefix applied to a Function App resource id to form the backend `resourceId`
pub const BACKEND_RESOURCE_ID_PREFIX: &str = "https://management.azure.com";

/// Header the Functions host reads the invocation key from
pub const FUNCTIONS_KEY_HEADER: &str = "x-functions-key";

/// Suffix appended to the service name to form the named-value property
pub const MASTER_KEY_PROPERTY_SUFFIX: &str = "-key";

/// Backend protocol used when the configuration does not specify one
pub const DEFAULT_BACKEND_PROTOCOL: &str = "http";

/// Route prefix of HTTP-triggered functions
pub const FUNCTIONS_ROUTE_PREFIX: &str = "/api";

/// Default number of attempts made by the retry executor
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default fixed delay between retry attempts (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
