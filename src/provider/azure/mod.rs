//! # Azure Providers
//!
//! Azure Resource Manager implementations of the provider traits.
//!
//! - `arm`: authenticated JSON transport shared by every client
//! - `resources`: API, backend and named-value clients
//! - `service`: the API Management service itself
//! - `function_app`: Function App descriptor and master key

mod arm;
mod auth;
mod function_app;
mod paths;
mod resources;
mod service;

pub use arm::ArmClient;
pub use auth::{build_credential, MockTokenCredential};
pub use function_app::ArmFunctionAppResolver;
pub use paths::ArmPath;
pub use resources::{
    ApiProperties, Apis, ArmApiClient, ArmBackendClient, ArmEnvelope, ArmPropertyClient,
    ArmResourceClient, ArmResourceKind, Backends, Properties,
};
pub use service::ArmGatewayServiceClient;
