//! # Engine Client Trait
//!
//! Defines the operations the lifecycle coordinator consumes from the remote
//! workflow engine. The host application implements [`EngineClient`] over its
//! pre-configured connection (gRPC/REST channel, auth, token caching); the
//! coordinator never constructs a transport itself.

use crate::engine::job::{Acknowledgement, Job, Variables};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Transport-level errors reported by an engine client implementation
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Transport error during {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("A subscription for job type '{job_type}' is already open")]
    DuplicateSubscription { job_type: String },
}

impl EngineError {
    /// Create a transport error
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate subscription error
    pub fn duplicate_subscription(job_type: impl Into<String>) -> Self {
        Self::DuplicateSubscription {
            job_type: job_type.into(),
        }
    }
}

/// Outcome of an atomic resource deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Engine-assigned key identifying this deployment
    pub deployment_key: String,
    /// Names of the resources the engine accepted, in submission order
    pub resources: Vec<String>,
}

/// Options for opening one job subscription, passed through to the engine
/// client unchanged. Intra-subscription concurrency and timeouts are engine
/// client policy, not coordinator policy.
#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub job_type: String,
    pub worker_identity: Option<String>,
    pub max_concurrent_jobs: usize,
    pub request_timeout: Option<Duration>,
}

/// Dispatch callback a subscription invokes for each delivered job.
///
/// An `Err` return is an unhandled handler fault: the engine client decides
/// whether the job is released back to the queue.
#[async_trait]
pub trait JobDispatch: Send + Sync {
    async fn dispatch(&self, job: Job) -> anyhow::Result<Acknowledgement>;
}

/// Handle to one open, long-lived job subscription
#[async_trait]
pub trait SubscriptionHandle: Send + Sync {
    /// The job type this subscription receives
    fn job_type(&self) -> &str;

    /// Stop intake of new jobs. Jobs already in flight inside a handler run
    /// to completion; close never aborts them.
    async fn close(&self) -> Result<(), EngineError>;
}

impl std::fmt::Debug for dyn SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("job_type", &self.job_type())
            .finish()
    }
}

/// The operations the coordinator needs from the remote workflow engine
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Deploy the given resource files as one atomic deployment call
    async fn deploy_resources_from_files(
        &self,
        paths: &[PathBuf],
    ) -> Result<DeploymentResult, EngineError>;

    /// Open a long-lived subscription for one job type, delivering each job
    /// to `dispatch`
    async fn create_subscription(
        &self,
        request: SubscriptionRequest,
        dispatch: Arc<dyn JobDispatch>,
    ) -> Result<Box<dyn SubscriptionHandle>, EngineError>;

    /// Start a new instance of a deployed process definition, returning the
    /// engine-assigned instance key
    async fn create_process_instance(
        &self,
        process_definition_id: &str,
        variables: Variables,
    ) -> Result<String, EngineError>;
}
