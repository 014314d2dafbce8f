//! # Error Types
//!
//! Structured error handling for the coordinator using thiserror.
//!
//! Structural failures (bad configuration, failed deployment, failed instance
//! enumeration) surface through [`FlowbindError`] and are fatal to the
//! affected workflow's startup. Failures local to one handler or one job type
//! are logged and contained by the lifecycle steps instead of being raised
//! here.

use thiserror::Error;

/// Errors that escalate to the caller of a lifecycle operation
#[derive(Error, Debug)]
pub enum FlowbindError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Deployment failed for workflow '{workflow_name}': {message}")]
    Deployment {
        workflow_name: String,
        message: String,
    },

    #[error("Worker registration failed for workflow '{workflow_name}': {message}")]
    WorkerRegistration {
        workflow_name: String,
        message: String,
    },
}

impl FlowbindError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a deployment error with workflow context
    pub fn deployment(workflow_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Deployment {
            workflow_name: workflow_name.into(),
            message: message.into(),
        }
    }

    /// Create a worker registration error with workflow context
    pub fn worker_registration(
        workflow_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::WorkerRegistration {
            workflow_name: workflow_name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowbindError>;
