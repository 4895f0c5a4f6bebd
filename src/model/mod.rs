//! # Resource Model
//!
//! Domain shapes for the gateway resources this crate manages and for the
//! compute app it fronts.
//!
//! These types are flat. The ARM wire envelope (`{ id, name, properties }`)
//! lives with the Azure client in [`crate::provider::azure`].

mod api;
mod backend;
mod compute;
mod property;
mod service;

pub use api::ApiResource;
pub(crate) use backend::redact_proxy;
pub use backend::{BackendCredentials, BackendResource};
pub use compute::{ComputeApp, MasterKey};
pub use property::PropertyResource;
pub use service::{ApiManagementService, ServiceSku};
