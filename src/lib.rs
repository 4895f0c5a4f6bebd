//! # APIM Provisioner
//!
//! Provisions an Azure API Management API in front of an Azure Function App.
//!
//! ## Overview
//!
//! A deployment upserts three gateway resources, in order:
//!
//! 1. **API** - the published API definition, always the current revision
//! 2. **Backend** - the Function App's `/api` endpoint, authenticated with
//!    the `x-functions-key` header
//! 3. **Property** - a secret named value holding the Function App master key,
//!    referenced by the backend credentials
//!
//! The [`apim::ApiManagementOrchestrator`] drives the sequence against
//! provider traits; [`provider::azure`] implements them over Azure Resource
//! Manager. [`retry::run_with_retry`] is available to callers that want to
//! retry transient failures.

pub mod apim;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod observability;
pub mod provider;
pub mod retry;

pub mod prelude;
