//! # Lifecycle Coordinator
//!
//! Per-workflow state machine that sequences startup and owns teardown:
//!
//! ```text
//! Idle -> Deploying -> Registering -> Running -> ShuttingDown -> Stopped
//!              |             |
//!              v             v
//!            Failed        Failed
//! ```
//!
//! The ordering invariant "no subscriptions without a successful deployment"
//! is enforced by sequencing: the registration step is only reachable after
//! the deployment step returns success. The coordinator exclusively owns the
//! set of open subscription handles its registration pass produced; no other
//! component may close a subscription it did not open.

use crate::config::{WorkerOptions, WorkflowConfig};
use crate::discovery::InstanceDiscovery;
use crate::engine::{EngineClient, SubscriptionHandle};
use crate::error::Result;
use crate::lifecycle::deployment::DeploymentStep;
use crate::lifecycle::registration::WorkerRegistrationStep;
use crate::logging::log_lifecycle_operation;
use crate::registry::BindingRegistry;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::error;

/// Lifecycle state of one workflow's coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Deploying,
    Registering,
    Running,
    ShuttingDown,
    Stopped,
    Failed,
}

/// Coordinates deployment, worker registration, and shutdown for one workflow
pub struct LifecycleCoordinator {
    workflow_name: String,
    deployment: DeploymentStep,
    registration: WorkerRegistrationStep,
    state: RwLock<WorkflowState>,
    subscriptions: Mutex<Vec<Box<dyn SubscriptionHandle>>>,
}

impl LifecycleCoordinator {
    /// Build a coordinator for one workflow. Validates the workflow
    /// configuration before anything touches the network.
    pub fn new(
        client: Arc<dyn EngineClient>,
        discovery: Arc<dyn InstanceDiscovery>,
        bindings: Arc<BindingRegistry>,
        workflow: WorkflowConfig,
        worker_options: WorkerOptions,
    ) -> Result<Self> {
        workflow.validate()?;

        let workflow_name = workflow.workflow_name.clone();
        let registration = WorkerRegistrationStep::new(
            client.clone(),
            discovery,
            bindings,
            workflow_name.clone(),
            worker_options,
        );
        let deployment = DeploymentStep::new(client, workflow);

        Ok(Self {
            workflow_name,
            deployment,
            registration,
            state: RwLock::new(WorkflowState::Idle),
            subscriptions: Mutex::new(Vec::new()),
        })
    }

    /// Current lifecycle state
    pub async fn state(&self) -> WorkflowState {
        *self.state.read().await
    }

    /// Number of subscriptions currently tracked for shutdown
    pub async fn open_subscriptions(&self) -> usize {
        self.subscriptions.lock().await.len()
    }

    /// Run the startup sequence: deploy, then register workers.
    ///
    /// Deployment failure aborts startup before registration runs and leaves
    /// the workflow in the terminal `Failed` state. Partial handler
    /// registration is acceptable; a failed enumeration pass is not.
    pub async fn start(&self) -> Result<()> {
        *self.state.write().await = WorkflowState::Deploying;
        log_lifecycle_operation(
            "startup",
            &self.workflow_name,
            "deploying",
            "started",
            None,
        );
        if let Err(e) = self.deployment.deploy().await {
            *self.state.write().await = WorkflowState::Failed;
            error!(
                workflow_name = self.workflow_name.as_str(),
                error = %e,
                "Failed to initialize workflow"
            );
            return Err(e);
        }

        *self.state.write().await = WorkflowState::Registering;
        log_lifecycle_operation(
            "startup",
            &self.workflow_name,
            "registering",
            "deployed",
            None,
        );
        match self.registration.register_workers().await {
            Ok(handles) => {
                let mut subscriptions = self.subscriptions.lock().await;
                subscriptions.extend(handles);
            }
            Err(e) => {
                *self.state.write().await = WorkflowState::Failed;
                error!(
                    workflow_name = self.workflow_name.as_str(),
                    error = %e,
                    "Failed to initialize workflow"
                );
                return Err(e);
            }
        }

        *self.state.write().await = WorkflowState::Running;
        log_lifecycle_operation(
            "startup",
            &self.workflow_name,
            "running",
            "completed",
            None,
        );
        Ok(())
    }

    /// Close every tracked subscription and clear the tracked set.
    ///
    /// Close is "stop intake": jobs already in flight inside a handler run to
    /// completion. A close failure on one subscription is logged and does not
    /// prevent the remaining subscriptions from being closed.
    pub async fn shutdown(&self) {
        *self.state.write().await = WorkflowState::ShuttingDown;
        log_lifecycle_operation(
            "shutdown",
            &self.workflow_name,
            "shutting_down",
            "started",
            None,
        );

        // Drain so each handle is closed exactly once even if shutdown is
        // called twice
        let handles = {
            let mut subscriptions = self.subscriptions.lock().await;
            std::mem::take(&mut *subscriptions)
        };

        let results = futures::future::join_all(handles.iter().map(|h| h.close())).await;
        for (handle, result) in handles.iter().zip(results) {
            if let Err(e) = result {
                error!(
                    workflow_name = self.workflow_name.as_str(),
                    job_type = handle.job_type(),
                    error = %e,
                    "Error closing subscription"
                );
            }
        }

        *self.state.write().await = WorkflowState::Stopped;
        log_lifecycle_operation(
            "shutdown",
            &self.workflow_name,
            "stopped",
            "completed",
            None,
        );
    }
}
