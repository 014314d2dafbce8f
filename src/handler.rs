//! # Handler Contract
//!
//! The capability every job handler implements: given an immutable [`Job`],
//! asynchronously produce exactly one terminal [`Acknowledgement`].
//!
//! A handler may perform arbitrary asynchronous work before acknowledging.
//! Returning `Err` is an unhandled handler fault, not an implicit `Failed`
//! acknowledgement: the handler's internal error may already have left side
//! effects whose Completed/Failed distinction only the handler can decide, so
//! the coordinator logs the fault and re-raises it to the engine client's
//! subscription machinery.

use crate::engine::{Acknowledgement, Job};
use async_trait::async_trait;

/// Trait implemented by application job handlers
///
/// # Example
///
/// ```rust
/// use flowbind::{Acknowledgement, Job, JobHandler, Variables};
/// use async_trait::async_trait;
/// use serde_json::json;
///
/// struct ChargePaymentHandler;
///
/// #[async_trait]
/// impl JobHandler for ChargePaymentHandler {
///     async fn handle(&self, job: Job) -> anyhow::Result<Acknowledgement> {
///         let amount = job.variable("amount").and_then(|v| v.as_i64()).unwrap_or(0);
///         if amount > 1000 {
///             return Ok(job.fail(format!("Payment failed: amount {amount} exceeds limit")));
///         }
///         let mut output = Variables::new();
///         output.insert("charged".to_string(), json!(true));
///         Ok(job.complete(output))
///     }
/// }
/// ```
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Process one job and produce its terminal acknowledgement
    async fn handle(&self, job: Job) -> anyhow::Result<Acknowledgement>;

    /// Handler name used for logging and diagnostics
    fn handler_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
