//! # Binding Metadata Registry
//!
//! Declarative job-binding metadata attached to handler types, held in a
//! thread-safe registry.
//!
//! ## Key Properties
//!
//! - **Explicit registration**: `bind` is an ordinary call executed at
//!   startup, so "must be declared before discovery runs" is a visible
//!   contract rather than hidden reflection.
//! - **Validated before the network**: both metadata fields are checked at
//!   bind time and re-checked by the registration step; invalid metadata
//!   never reaches the engine client.
//! - **Duplicate rejection**: a second binding claiming an already-bound
//!   `(workflow, job type)` pair fails loudly and leaves the first binding
//!   intact.
//!
//! ## Usage
//!
//! ```rust
//! use flowbind::BindingRegistry;
//!
//! # async fn example() -> flowbind::Result<()> {
//! let registry = BindingRegistry::new();
//! registry.bind("ChargePaymentHandler", "charge-payment", "order-workflow").await?;
//!
//! let metadata = registry.metadata_for("ChargePaymentHandler").await.unwrap();
//! assert_eq!(metadata.job_type, "charge-payment");
//! # Ok(())
//! # }
//! ```

use crate::error::{FlowbindError, Result};
use crate::logging::log_registry_operation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Declarative job-binding metadata attached to one handler type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingMetadata {
    /// The job type this handler processes
    pub job_type: String,
    /// The workflow this handler belongs to
    pub workflow_name: String,
}

impl BindingMetadata {
    pub fn new(job_type: impl Into<String>, workflow_name: impl Into<String>) -> Self {
        Self {
            job_type: job_type.into(),
            workflow_name: workflow_name.into(),
        }
    }

    /// Validate that both fields are non-empty. Synchronous and
    /// side-effect-free.
    pub fn validate(&self) -> Result<()> {
        if self.job_type.is_empty() {
            return Err(FlowbindError::configuration("jobType cannot be empty"));
        }
        if self.workflow_name.is_empty() {
            return Err(FlowbindError::configuration(
                "workflowName cannot be empty",
            ));
        }
        Ok(())
    }
}

/// One stored binding with its registration timestamp
#[derive(Debug, Clone)]
pub struct BindingEntry {
    pub metadata: BindingMetadata,
    pub registered_at: DateTime<Utc>,
}

/// Statistics about stored bindings
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    pub total_bindings: usize,
    pub workflows: Vec<String>,
}

/// Thread-safe registry mapping handler-type identifiers to binding metadata
pub struct BindingRegistry {
    bindings: Arc<RwLock<HashMap<String, BindingEntry>>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Attach binding metadata to a handler type.
    ///
    /// Fails with a configuration error when either field is empty, when the
    /// handler type is already bound, or when another handler already claims
    /// the same job type within the same workflow (first registration wins,
    /// the registry is left unchanged).
    pub async fn bind(
        &self,
        handler_type: &str,
        job_type: &str,
        workflow_name: &str,
    ) -> Result<()> {
        if handler_type.is_empty() {
            return Err(FlowbindError::configuration(
                "handler type identifier cannot be empty",
            ));
        }

        let metadata = BindingMetadata::new(job_type, workflow_name);
        metadata.validate()?;

        let mut bindings = self.bindings.write().await;

        if bindings.contains_key(handler_type) {
            return Err(FlowbindError::configuration(format!(
                "Handler type '{handler_type}' is already bound"
            )));
        }

        if let Some((existing_type, _)) = bindings.iter().find(|(_, entry)| {
            entry.metadata.workflow_name == workflow_name && entry.metadata.job_type == job_type
        }) {
            return Err(FlowbindError::configuration(format!(
                "Job type '{job_type}' in workflow '{workflow_name}' is already bound to handler type '{existing_type}'"
            )));
        }

        bindings.insert(
            handler_type.to_string(),
            BindingEntry {
                metadata,
                registered_at: Utc::now(),
            },
        );

        log_registry_operation(
            "bind",
            Some(handler_type),
            Some(job_type),
            Some(workflow_name),
            "bound",
            None,
        );
        Ok(())
    }

    /// Metadata attached to a handler type, if any
    pub async fn metadata_for(&self, handler_type: &str) -> Option<BindingMetadata> {
        let bindings = self.bindings.read().await;
        bindings.get(handler_type).map(|e| e.metadata.clone())
    }

    /// All bindings declared for one workflow as
    /// `(handler_type, metadata)` pairs
    pub async fn bindings_for_workflow(
        &self,
        workflow_name: &str,
    ) -> Vec<(String, BindingMetadata)> {
        let bindings = self.bindings.read().await;
        bindings
            .iter()
            .filter(|(_, entry)| entry.metadata.workflow_name == workflow_name)
            .map(|(handler_type, entry)| (handler_type.clone(), entry.metadata.clone()))
            .collect()
    }

    /// Registry statistics
    pub async fn stats(&self) -> RegistryStats {
        let bindings = self.bindings.read().await;
        let mut workflows: Vec<String> = bindings
            .values()
            .map(|e| e.metadata.workflow_name.clone())
            .collect();
        workflows.sort();
        workflows.dedup();

        debug!(
            total = bindings.len(),
            workflows = workflows.len(),
            "Computed binding registry stats"
        );

        RegistryStats {
            total_bindings: bindings.len(),
            workflows,
        }
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BindingRegistry {
    fn clone(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}
