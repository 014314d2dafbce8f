#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Flowbind
//!
//! Client-side coordinator that binds user-defined job handlers to a workflow
//! engine's external task queue.
//!
//! ## Overview
//!
//! Flowbind guarantees three things for every workflow it manages:
//!
//! - the engine never receives job subscriptions before the workflow's process
//!   definition and forms are deployed,
//! - each job type is bound to exactly one handler scoped to a declared
//!   workflow, and
//! - handler completion/failure results are relayed back to the engine with a
//!   structured acknowledgement.
//!
//! The engine itself, the host's component discovery, and transport/auth
//! plumbing stay behind traits ([`EngineClient`], [`InstanceDiscovery`]) that
//! the host application implements.
//!
//! ## Module Organization
//!
//! - [`engine`] - Engine client facade, jobs, acknowledgements, subscriptions
//! - [`handler`] - The contract every job handler implements
//! - [`registry`] - Explicit handler-type to binding-metadata registry
//! - [`discovery`] - Instance enumeration capability supplied by the host
//! - [`lifecycle`] - Deployment, worker registration, and the coordinator
//! - [`config`] - Connection, workflow, and worker configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging bootstrap
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowbind::{BindingRegistry, LifecycleCoordinator, WorkflowConfig, WorkerOptions};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     client: Arc<dyn flowbind::EngineClient>,
//! #     discovery: Arc<dyn flowbind::InstanceDiscovery>,
//! # ) -> flowbind::Result<()> {
//! let bindings = Arc::new(BindingRegistry::new());
//! bindings.bind("ChargePaymentHandler", "charge-payment", "order-workflow").await?;
//!
//! let workflow = WorkflowConfig::new("order-workflow", "resources/order.bpmn");
//! let coordinator = LifecycleCoordinator::new(
//!     client,
//!     discovery,
//!     bindings,
//!     workflow,
//!     WorkerOptions::default(),
//! )?;
//!
//! coordinator.start().await?;
//! // ... process runs, subscriptions pump jobs to their handlers ...
//! coordinator.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod logging;
pub mod registry;

pub use config::{AuthStrategy, ConnectionConfig, WorkerOptions, WorkflowConfig};
pub use discovery::{AnyInstance, DiscoveredInstance, InstanceDiscovery};
pub use engine::{
    Acknowledgement, DeploymentResult, EngineClient, EngineError, Job, JobDispatch,
    SubscriptionHandle, SubscriptionRequest, Variables,
};
pub use error::{FlowbindError, Result};
pub use handler::JobHandler;
pub use lifecycle::{DeploymentStep, LifecycleCoordinator, WorkerRegistrationStep, WorkflowState};
pub use registry::{BindingMetadata, BindingRegistry};
