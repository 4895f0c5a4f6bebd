//! Common test utilities
//!
//! Shared rustls setup for the contract tests, and in-memory fakes of the
//! provider traits that record every call into a shared log.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use apim_provisioner::apim::ApiManagementOrchestrator;
use apim_provisioner::config::{ApiSpec, DeploymentConfig};
use apim_provisioner::error::ApimError;
use apim_provisioner::model::{
    ApiManagementService, ApiResource, BackendResource, ComputeApp, MasterKey, PropertyResource,
};
use apim_provisioner::provider::{ComputeAppResolver, GatewayServiceClient, ResourceClient};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, Once};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` so it is installed a single time per test binary.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
    });
}

/// Ordered record of calls made against the fakes
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Failure a fake should produce. `ApimError` is not `Clone`, so fakes keep
/// this recipe and build a fresh error per call.
#[derive(Debug, Clone)]
pub enum Fault {
    NotFound,
    Remote(u16, &'static str),
}

impl Fault {
    pub fn to_error(&self, resource: &str) -> ApimError {
        match self {
            Self::NotFound => ApimError::NotFound {
                resource: resource.to_string(),
            },
            Self::Remote(status, message) => ApimError::Remote {
                status: *status,
                code: None,
                message: (*message).to_string(),
            },
        }
    }
}

/// Assert `error` is the remote fault a fake produced from `status`/`message`
pub fn assert_remote(error: &ApimError, status: u16, message: &str) {
    match error {
        ApimError::Remote {
            status: s,
            message: m,
            ..
        } => {
            assert_eq!(*s, status);
            assert_eq!(m, message);
        }
        other => panic!("expected remote fault {status} {message}, got {other:?}"),
    }
}

pub fn sample_app() -> ComputeApp {
    ComputeApp {
        id: "/testapp1".to_string(),
        name: "testapp1".to_string(),
        location: "West US".to_string(),
        default_host_name: "testsite.azurewebsites.net".to_string(),
    }
}

pub fn sample_config() -> DeploymentConfig {
    DeploymentConfig {
        service_name: "test-sls".to_string(),
        resource_group: "test-sls-rg".to_string(),
        location: "West US".to_string(),
        gateway_service_name: "test-apim".to_string(),
        api: ApiSpec {
            name: "test-api".to_string(),
            subscription_required: false,
            display_name: "Test API".to_string(),
            description: Some("Test API description".to_string()),
            protocols: ["https".to_string()].into_iter().collect(),
            path: "test-api".to_string(),
        },
        backend: None,
        function_app: None,
    }
}

pub struct FakeResolver {
    log: CallLog,
    app: ComputeApp,
    master_key: &'static str,
    app_fault: Option<Fault>,
    key_fault: Option<Fault>,
    app_pending: bool,
    key_pending: bool,
}

impl FakeResolver {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
            app: sample_app(),
            master_key: "ABC123",
            app_fault: None,
            key_fault: None,
            app_pending: false,
            key_pending: false,
        }
    }

    /// `resolve_app` never completes
    pub fn pending_app(mut self) -> Self {
        self.app_pending = true;
        self
    }

    /// `resolve_master_key` never completes
    pub fn pending_key(mut self) -> Self {
        self.key_pending = true;
        self
    }

    pub fn failing_app(mut self, fault: Fault) -> Self {
        self.app_fault = Some(fault);
        self
    }

    pub fn failing_key(mut self, fault: Fault) -> Self {
        self.key_fault = Some(fault);
        self
    }
}

#[async_trait]
impl ComputeAppResolver for FakeResolver {
    async fn resolve_app(&self) -> Result<ComputeApp, ApimError> {
        self.log.lock().unwrap().push("resolve_app".to_string());
        if self.app_pending {
            std::future::pending::<()>().await;
        }
        match &self.app_fault {
            Some(fault) => Err(fault.to_error("sites/testapp1")),
            None => Ok(self.app.clone()),
        }
    }

    async fn resolve_master_key(&self) -> Result<MasterKey, ApimError> {
        self.log.lock().unwrap().push("resolve_master_key".to_string());
        if self.key_pending {
            std::future::pending::<()>().await;
        }
        match &self.key_fault {
            Some(fault) => Err(fault.to_error("sites/testapp1/host/default")),
            None => Ok(MasterKey::new(self.master_key)),
        }
    }
}

/// One upsert as the fake received it
#[derive(Debug, Clone)]
pub struct Submitted<R> {
    pub resource_group: String,
    pub service_name: String,
    pub resource_id: String,
    pub descriptor: R,
}

pub struct FakeResourceClient<R> {
    kind: &'static str,
    log: CallLog,
    stored: Option<R>,
    get_fault: Option<Fault>,
    upsert_fault: Option<Fault>,
    upsert_failures: Mutex<u32>,
    upsert_response: Option<R>,
    submitted: Mutex<Vec<Submitted<R>>>,
}

impl<R: Clone + Send + Sync> FakeResourceClient<R> {
    pub fn new(kind: &'static str, log: &CallLog) -> Self {
        Self {
            kind,
            log: Arc::clone(log),
            stored: None,
            get_fault: None,
            upsert_fault: None,
            upsert_failures: Mutex::new(0),
            upsert_response: None,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Resource returned by `get`; `get` reports not-found without one
    pub fn with_stored(mut self, resource: R) -> Self {
        self.stored = Some(resource);
        self
    }

    pub fn failing_get(mut self, fault: Fault) -> Self {
        self.get_fault = Some(fault);
        self
    }

    /// Fail every upsert
    pub fn failing_upsert(self, fault: Fault) -> Self {
        self.failing_upserts(fault, u32::MAX)
    }

    /// Fail the first `times` upserts, then succeed
    pub fn failing_upserts(mut self, fault: Fault, times: u32) -> Self {
        self.upsert_fault = Some(fault);
        self.upsert_failures = Mutex::new(times);
        self
    }

    /// Resource returned by a successful upsert instead of the descriptor
    pub fn responding_with(mut self, resource: R) -> Self {
        self.upsert_response = Some(resource);
        self
    }

    pub fn submitted(&self) -> Vec<Submitted<R>> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: Clone + Send + Sync> ResourceClient<R> for FakeResourceClient<R> {
    async fn get(
        &self,
        _resource_group: &str,
        _service_name: &str,
        resource_id: &str,
    ) -> Result<R, ApimError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:get:{resource_id}", self.kind));
        if let Some(fault) = &self.get_fault {
            return Err(fault.to_error(resource_id));
        }
        self.stored.clone().ok_or_else(|| ApimError::NotFound {
            resource: resource_id.to_string(),
        })
    }

    async fn create_or_update(
        &self,
        resource_group: &str,
        service_name: &str,
        resource_id: &str,
        descriptor: &R,
    ) -> Result<R, ApimError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:create_or_update:{resource_id}", self.kind));
        self.submitted.lock().unwrap().push(Submitted {
            resource_group: resource_group.to_string(),
            service_name: service_name.to_string(),
            resource_id: resource_id.to_string(),
            descriptor: descriptor.clone(),
        });

        if let Some(fault) = &self.upsert_fault {
            let mut remaining = self.upsert_failures.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(fault.to_error(resource_id));
            }
        }

        Ok(self
            .upsert_response
            .clone()
            .unwrap_or_else(|| descriptor.clone()))
    }
}

pub struct FakeServiceClient {
    log: CallLog,
    service: Option<ApiManagementService>,
    fault: Option<Fault>,
}

impl FakeServiceClient {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
            service: None,
            fault: None,
        }
    }

    pub fn with_service(mut self, service: ApiManagementService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn failing(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }
}

#[async_trait]
impl GatewayServiceClient for FakeServiceClient {
    async fn get(
        &self,
        _resource_group: &str,
        service_name: &str,
    ) -> Result<ApiManagementService, ApimError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("service:get:{service_name}"));
        if let Some(fault) = &self.fault {
            return Err(fault.to_error(service_name));
        }
        self.service.clone().ok_or_else(|| ApimError::NotFound {
            resource: service_name.to_string(),
        })
    }
}

/// Fakes wired into an orchestrator, kept reachable for assertions
pub struct Harness {
    pub log: CallLog,
    pub api: Arc<FakeResourceClient<ApiResource>>,
    pub backend: Arc<FakeResourceClient<BackendResource>>,
    pub property: Arc<FakeResourceClient<PropertyResource>>,
    pub orchestrator: ApiManagementOrchestrator,
}

/// Builder for a [`Harness`]; every fake defaults to success
pub struct HarnessBuilder {
    pub log: CallLog,
    pub config: DeploymentConfig,
    pub resolver: FakeResolver,
    pub service: FakeServiceClient,
    pub api: FakeResourceClient<ApiResource>,
    pub backend: FakeResourceClient<BackendResource>,
    pub property: FakeResourceClient<PropertyResource>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        let log: CallLog = Arc::default();
        Self {
            config: sample_config(),
            resolver: FakeResolver::new(&log),
            service: FakeServiceClient::new(&log),
            api: FakeResourceClient::new("api", &log),
            backend: FakeResourceClient::new("backend", &log),
            property: FakeResourceClient::new("property", &log),
            log,
        }
    }

    pub fn build(self) -> Harness {
        let api = Arc::new(self.api);
        let backend = Arc::new(self.backend);
        let property = Arc::new(self.property);
        let orchestrator = ApiManagementOrchestrator::new(
            self.config,
            Arc::new(self.resolver),
            Arc::new(self.service),
            Arc::clone(&api) as Arc<dyn ResourceClient<ApiResource>>,
            Arc::clone(&backend) as Arc<dyn ResourceClient<BackendResource>>,
            Arc::clone(&property) as Arc<dyn ResourceClient<PropertyResource>>,
        );
        Harness {
            log: self.log,
            api,
            backend,
            property,
            orchestrator,
        }
    }
}

impl Harness {
    /// Upsert calls only, in the order they were made
    pub fn upserts(&self) -> Vec<String> {
        entries(&self.log)
            .into_iter()
            .filter(|entry| entry.contains(":create_or_update:"))
            .collect()
    }
}
