//! # Deployment Step
//!
//! Deploys one workflow's process definition and auxiliary form files to the
//! engine as a single atomic deployment call. The process definition is
//! always the first resource in the list, forms follow in declared order.
//!
//! Deployment failure is fatal to that workflow's startup: the error is
//! wrapped with workflow-name context and propagated. No retry happens inside
//! this step; retry policy, if any, belongs to the caller.

use crate::config::WorkflowConfig;
use crate::engine::{DeploymentResult, EngineClient};
use crate::error::{FlowbindError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Deploys one workflow's resources to the engine
pub struct DeploymentStep {
    client: Arc<dyn EngineClient>,
    workflow: WorkflowConfig,
}

impl DeploymentStep {
    pub fn new(client: Arc<dyn EngineClient>, workflow: WorkflowConfig) -> Self {
        Self { client, workflow }
    }

    /// Deploy the configured process definition and form files
    pub async fn deploy(&self) -> Result<DeploymentResult> {
        let workflow_name = &self.workflow.workflow_name;

        let mut resources: Vec<PathBuf> = Vec::with_capacity(1 + self.workflow.forms.len());
        resources.push(self.workflow.process_definition.clone());
        resources.extend(self.workflow.forms.iter().cloned());

        if self.workflow.forms.is_empty() {
            info!(
                workflow_name = workflow_name.as_str(),
                "Deploying process definition"
            );
        } else {
            info!(
                workflow_name = workflow_name.as_str(),
                form_count = self.workflow.forms.len(),
                "Deploying process definition and form resources"
            );
        }

        let result = self
            .client
            .deploy_resources_from_files(&resources)
            .await
            .map_err(|e| {
                error!(
                    workflow_name = workflow_name.as_str(),
                    error = %e,
                    "Failed to deploy resources"
                );
                FlowbindError::deployment(workflow_name, e.to_string())
            })?;

        info!(
            workflow_name = workflow_name.as_str(),
            deployment_key = result.deployment_key.as_str(),
            resources = ?result.resources,
            "Successfully deployed resources"
        );
        Ok(result)
    }
}
