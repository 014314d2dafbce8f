//! # Workflow Lifecycle
//!
//! The sequenced startup and teardown of one workflow's engine bindings:
//!
//! - [`DeploymentStep`] deploys the process definition and form files as one
//!   atomic call,
//! - [`WorkerRegistrationStep`] discovers handler instances, validates their
//!   binding metadata, and opens one subscription per job type,
//! - [`LifecycleCoordinator`] enforces the ordering invariant "deployment
//!   completes before any subscription opens" and owns the shutdown sequence.
//!
//! Multiple workflows run independent coordinator instances concurrently and
//! share nothing but the engine connection.

pub mod coordinator;
pub mod deployment;
pub mod registration;

pub use coordinator::{LifecycleCoordinator, WorkflowState};
pub use deployment::DeploymentStep;
pub use registration::WorkerRegistrationStep;
