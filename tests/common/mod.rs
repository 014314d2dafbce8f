//! Shared test doubles: a recording mock engine client, a static discovery
//! snapshot, and handler fixtures used across the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use flowbind::{
    Acknowledgement, DeploymentResult, DiscoveredInstance, EngineClient, EngineError,
    InstanceDiscovery, Job, JobDispatch, JobHandler, SubscriptionHandle, SubscriptionRequest,
    Variables,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One subscription the mock engine accepted, with its dispatch callback so
/// tests can drive jobs through it
pub struct RecordedSubscription {
    pub request: SubscriptionRequest,
    pub dispatch: Arc<dyn JobDispatch>,
}

/// Recording mock engine client. Captures an ordered call log so tests can
/// assert that deployment strictly precedes subscription opens.
#[derive(Default)]
pub struct MockEngineClient {
    /// Ordered log: `deploy:<first resource>` and `subscribe:<job type>`
    pub calls: Mutex<Vec<String>>,
    pub deployments: Mutex<Vec<Vec<PathBuf>>>,
    pub subscriptions: Mutex<Vec<RecordedSubscription>>,
    /// Close attempts across all handles, in order
    pub close_attempts: Arc<Mutex<Vec<String>>>,
    pub fail_deploy: AtomicBool,
    pub fail_subscribe_for: Mutex<Option<String>>,
    pub fail_close_for: Mutex<Option<String>>,
}

impl MockEngineClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subscribed_job_types(&self) -> Vec<String> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.request.job_type.clone())
            .collect()
    }

    pub fn dispatch_for(&self, job_type: &str) -> Option<Arc<dyn JobDispatch>> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.request.job_type == job_type)
            .map(|s| s.dispatch.clone())
    }
}

#[async_trait]
impl EngineClient for MockEngineClient {
    async fn deploy_resources_from_files(
        &self,
        paths: &[PathBuf],
    ) -> Result<DeploymentResult, EngineError> {
        let first = paths
            .first()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(format!("deploy:{first}"));

        if self.fail_deploy.load(Ordering::SeqCst) {
            return Err(EngineError::transport(
                "deploy_resources_from_files",
                "connection refused",
            ));
        }

        self.deployments.lock().unwrap().push(paths.to_vec());
        Ok(DeploymentResult {
            deployment_key: format!("deployment-{}", self.deployments.lock().unwrap().len()),
            resources: paths.iter().map(|p| p.display().to_string()).collect(),
        })
    }

    async fn create_subscription(
        &self,
        request: SubscriptionRequest,
        dispatch: Arc<dyn JobDispatch>,
    ) -> Result<Box<dyn SubscriptionHandle>, EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("subscribe:{}", request.job_type));

        if self.fail_subscribe_for.lock().unwrap().as_deref() == Some(request.job_type.as_str()) {
            return Err(EngineError::duplicate_subscription(&request.job_type));
        }

        let fail_close =
            self.fail_close_for.lock().unwrap().as_deref() == Some(request.job_type.as_str());
        let handle = MockSubscriptionHandle {
            job_type: request.job_type.clone(),
            close_attempts: self.close_attempts.clone(),
            fail_close,
        };

        self.subscriptions
            .lock()
            .unwrap()
            .push(RecordedSubscription { request, dispatch });
        Ok(Box::new(handle))
    }

    async fn create_process_instance(
        &self,
        process_definition_id: &str,
        _variables: Variables,
    ) -> Result<String, EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("start:{process_definition_id}"));
        Ok(format!("instance-of-{process_definition_id}"))
    }
}

pub struct MockSubscriptionHandle {
    job_type: String,
    close_attempts: Arc<Mutex<Vec<String>>>,
    fail_close: bool,
}

#[async_trait]
impl SubscriptionHandle for MockSubscriptionHandle {
    fn job_type(&self) -> &str {
        &self.job_type
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.close_attempts
            .lock()
            .unwrap()
            .push(self.job_type.clone());
        if self.fail_close {
            return Err(EngineError::transport("close_subscription", "stream reset"));
        }
        Ok(())
    }
}

/// Discovery fixture returning a fixed snapshot
pub struct StaticDiscovery {
    instances: Vec<DiscoveredInstance>,
}

impl StaticDiscovery {
    pub fn new(instances: Vec<DiscoveredInstance>) -> Self {
        Self { instances }
    }
}

impl InstanceDiscovery for StaticDiscovery {
    fn enumerate_instances(&self) -> anyhow::Result<Vec<DiscoveredInstance>> {
        Ok(self.instances.clone())
    }
}

/// Discovery fixture whose enumeration pass fails entirely
pub struct FailingDiscovery;

impl InstanceDiscovery for FailingDiscovery {
    fn enumerate_instances(&self) -> anyhow::Result<Vec<DiscoveredInstance>> {
        anyhow::bail!("container not ready")
    }
}

/// Payment handler fixture: amounts over 1000 are rejected with a failure
/// acknowledgement referencing the amount
pub struct ChargePaymentHandler;

#[async_trait]
impl JobHandler for ChargePaymentHandler {
    async fn handle(&self, job: Job) -> anyhow::Result<Acknowledgement> {
        let amount = job.variable("amount").and_then(|v| v.as_i64()).unwrap_or(0);

        if amount > 1000 {
            return Ok(job.fail(format!("Payment failed: amount {amount} exceeds limit")));
        }

        let order_id = job
            .variable("orderId")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        let mut output = Variables::new();
        output.insert("transactionId".to_string(), json!(format!("txn-{order_id}")));
        output.insert("charged".to_string(), json!(true));
        Ok(job.complete(output))
    }
}

/// Handler fixture that completes every job with no output variables
pub struct NoopHandler;

#[async_trait]
impl JobHandler for NoopHandler {
    async fn handle(&self, job: Job) -> anyhow::Result<Acknowledgement> {
        Ok(job.complete(Variables::new()))
    }
}

/// Handler fixture that raises an unhandled fault instead of acknowledging
pub struct FaultyHandler;

#[async_trait]
impl JobHandler for FaultyHandler {
    async fn handle(&self, _job: Job) -> anyhow::Result<Acknowledgement> {
        anyhow::bail!("inventory database unavailable")
    }
}

/// Build a job with the given type and variables
pub fn job_with(job_type: &str, key: &str, variables: Variables) -> Job {
    Job::new(key, job_type, variables, Variables::new())
}
