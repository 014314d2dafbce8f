//! # Worker Registration Step
//!
//! Discovers handler instances in the running process, filters them to the
//! workflow being registered, validates their binding metadata, and opens one
//! subscription per surviving `(job type, handler)` pair.
//!
//! ## Containment
//!
//! Registration prefers partial availability over total unavailability:
//!
//! - instances without binding metadata are skipped silently (most discovered
//!   instances are not handlers),
//! - instances bound to another workflow are skipped (one process may host
//!   handlers for several workflows),
//! - instances carrying metadata but not satisfying the handler contract are
//!   logged and skipped; their correctly-wired siblings still register,
//! - a failed subscription open is logged and the remaining job types proceed.
//!
//! Only a failed enumeration pass fails the whole step.

use crate::config::WorkerOptions;
use crate::discovery::{AnyInstance, InstanceDiscovery};
use crate::engine::{
    Acknowledgement, EngineClient, EngineError, Job, JobDispatch, SubscriptionHandle,
    SubscriptionRequest,
};
use crate::error::{FlowbindError, Result};
use crate::handler::JobHandler;
use crate::logging::log_job_operation;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::registry::BindingRegistry;

/// Opens one subscription per valid handler binding in one workflow
pub struct WorkerRegistrationStep {
    client: Arc<dyn EngineClient>,
    discovery: Arc<dyn InstanceDiscovery>,
    bindings: Arc<BindingRegistry>,
    workflow_name: String,
    worker_options: WorkerOptions,
}

impl WorkerRegistrationStep {
    pub fn new(
        client: Arc<dyn EngineClient>,
        discovery: Arc<dyn InstanceDiscovery>,
        bindings: Arc<BindingRegistry>,
        workflow_name: impl Into<String>,
        worker_options: WorkerOptions,
    ) -> Self {
        Self {
            client,
            discovery,
            bindings,
            workflow_name: workflow_name.into(),
            worker_options,
        }
    }

    /// Register all discovered handlers belonging to this workflow, returning
    /// the opened subscription handles for the coordinator to own
    pub async fn register_workers(&self) -> Result<Vec<Box<dyn SubscriptionHandle>>> {
        let instances = self.discovery.enumerate_instances().map_err(|e| {
            error!(
                workflow_name = self.workflow_name.as_str(),
                error = %e,
                "Failed to enumerate instances"
            );
            FlowbindError::worker_registration(
                &self.workflow_name,
                format!("instance enumeration failed: {e}"),
            )
        })?;

        let mut handles: Vec<Box<dyn SubscriptionHandle>> = Vec::new();

        for discovered in instances {
            let Some(metadata) = self.bindings.metadata_for(&discovered.declared_type).await
            else {
                continue;
            };

            // Registration is workflow-scoped
            if metadata.workflow_name != self.workflow_name {
                continue;
            }

            let handler = match discovered.instance {
                AnyInstance::Handler(handler) => handler,
                AnyInstance::Other(_) => {
                    error!(
                        workflow_name = self.workflow_name.as_str(),
                        declared_type = discovered.declared_type.as_str(),
                        job_type = metadata.job_type.as_str(),
                        "Instance carries binding metadata but does not satisfy the job handler contract; skipping"
                    );
                    continue;
                }
            };

            // Defense in depth: metadata may have been constructed outside
            // the bind call
            metadata.validate()?;

            match self.register_worker(&metadata.job_type, handler).await {
                Ok(handle) => {
                    info!(
                        workflow_name = self.workflow_name.as_str(),
                        job_type = metadata.job_type.as_str(),
                        "Registered worker for job type"
                    );
                    handles.push(handle);
                }
                Err(e) => {
                    error!(
                        workflow_name = self.workflow_name.as_str(),
                        job_type = metadata.job_type.as_str(),
                        error = %e,
                        "Failed to register worker for job type"
                    );
                }
            }
        }

        info!(
            workflow_name = self.workflow_name.as_str(),
            worker_count = handles.len(),
            "Worker registration pass completed"
        );
        Ok(handles)
    }

    async fn register_worker(
        &self,
        job_type: &str,
        handler: Arc<dyn JobHandler>,
    ) -> std::result::Result<Box<dyn SubscriptionHandle>, EngineError> {
        let request = SubscriptionRequest {
            job_type: job_type.to_string(),
            worker_identity: self.worker_options.worker_identity.clone(),
            max_concurrent_jobs: self.worker_options.max_concurrent_jobs,
            request_timeout: self.worker_options.request_timeout,
        };

        let dispatch = Arc::new(HandlerDispatch {
            workflow_name: self.workflow_name.clone(),
            job_type: job_type.to_string(),
            handler,
        });

        self.client.create_subscription(request, dispatch).await
    }
}

/// Per-subscription dispatch glue: logs job receipt, invokes the bound
/// handler, and re-raises handler faults to the engine client's subscription
/// machinery so it can apply its own job-release policy.
struct HandlerDispatch {
    workflow_name: String,
    job_type: String,
    handler: Arc<dyn JobHandler>,
}

#[async_trait]
impl JobDispatch for HandlerDispatch {
    async fn dispatch(&self, job: Job) -> anyhow::Result<Acknowledgement> {
        let job_key = job.key().to_string();
        debug!(
            workflow_name = self.workflow_name.as_str(),
            job_type = self.job_type.as_str(),
            job_key = job_key.as_str(),
            handler = self.handler.handler_name(),
            "Processing job"
        );

        match self.handler.handle(job).await {
            Ok(ack) => {
                log_job_operation(
                    "dispatch",
                    &self.workflow_name,
                    &self.job_type,
                    Some(&job_key),
                    if ack.is_completed() {
                        "completed"
                    } else {
                        "failed"
                    },
                    None,
                );
                Ok(ack)
            }
            Err(e) => {
                error!(
                    workflow_name = self.workflow_name.as_str(),
                    job_type = self.job_type.as_str(),
                    job_key = job_key.as_str(),
                    error = %e,
                    "Unhandled handler fault while processing job"
                );
                Err(e)
            }
        }
    }
}
