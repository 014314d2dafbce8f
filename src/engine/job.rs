//! # Jobs and Acknowledgements
//!
//! A [`Job`] is one unit of work the engine hands to a subscribed handler. It
//! is immutable for the duration of handling, and its terminal result is
//! exactly one [`Acknowledgement`]: `Completed` with output variables or
//! `Failed` with a message.
//!
//! Exactly-once acknowledgement is enforced at the type level: the only ways
//! to produce an [`Acknowledgement`] for a job are [`Job::complete`] and
//! [`Job::fail`], both of which consume the job.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured key/value variables carried by jobs and acknowledgements
pub type Variables = HashMap<String, serde_json::Value>;

/// One unit of work delivered by the engine to a subscribed handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    key: String,
    job_type: String,
    variables: Variables,
    custom_headers: Variables,
}

impl Job {
    pub fn new(
        key: impl Into<String>,
        job_type: impl Into<String>,
        variables: Variables,
        custom_headers: Variables,
    ) -> Self {
        Self {
            key: key.into(),
            job_type: job_type.into(),
            variables,
            custom_headers,
        }
    }

    /// Opaque engine-assigned identifier for this job
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The job type this job was delivered under
    pub fn job_type(&self) -> &str {
        &self.job_type
    }

    /// Input variables delivered with the job
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Look up a single input variable by name
    pub fn variable(&self, name: &str) -> Option<&serde_json::Value> {
        self.variables.get(name)
    }

    /// Custom headers attached to the job by the process definition
    pub fn custom_headers(&self) -> &Variables {
        &self.custom_headers
    }

    /// Acknowledge the job as completed, consuming it
    pub fn complete(self, variables: Variables) -> Acknowledgement {
        Acknowledgement::Completed { variables }
    }

    /// Acknowledge the job as failed, consuming it
    pub fn fail(self, message: impl Into<String>) -> Acknowledgement {
        Acknowledgement::Failed {
            message: message.into(),
        }
    }
}

/// Terminal result a handler produces for a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Acknowledgement {
    /// Job finished successfully with output variables for the engine
    Completed { variables: Variables },
    /// Job failed with a message the engine can surface or act on
    Failed { message: String },
}

impl Acknowledgement {
    pub fn is_completed(&self) -> bool {
        matches!(self, Acknowledgement::Completed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Acknowledgement::Failed { .. })
    }
}
