//! # Instance Discovery
//!
//! Abstraction over the host application's component discovery: given a
//! running process, enumerate the live object instances it knows about. The
//! coordinator never constructs handler instances itself; it filters a
//! snapshot supplied by the host against the binding registry.
//!
//! Whether an instance satisfies the handler contract is a compile-time fact
//! known where the snapshot is built, so [`AnyInstance`] makes the capability
//! check explicit: a discovered instance either carries a usable
//! `Arc<dyn JobHandler>` or it is opaque. An opaque instance whose declared
//! type has binding metadata attached is a configuration mistake the
//! registration step logs and skips.

use crate::handler::JobHandler;
use std::any::Any;
use std::sync::Arc;

/// A live instance surfaced by one enumeration pass
#[derive(Clone)]
pub enum AnyInstance {
    /// The instance satisfies the handler contract
    Handler(Arc<dyn JobHandler>),
    /// Any other live object the host process knows about
    Other(Arc<dyn Any + Send + Sync>),
}

impl std::fmt::Debug for AnyInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyInstance::Handler(h) => write!(f, "AnyInstance::Handler({})", h.handler_name()),
            AnyInstance::Other(_) => write!(f, "AnyInstance::Other"),
        }
    }
}

/// One entry in a discovery snapshot: a live instance plus the type
/// identifier it was declared under
#[derive(Debug, Clone)]
pub struct DiscoveredInstance {
    /// Type identifier matching the one used when binding metadata
    pub declared_type: String,
    pub instance: AnyInstance,
}

impl DiscoveredInstance {
    /// Create a snapshot entry for an instance satisfying the handler contract
    pub fn handler(declared_type: impl Into<String>, handler: Arc<dyn JobHandler>) -> Self {
        Self {
            declared_type: declared_type.into(),
            instance: AnyInstance::Handler(handler),
        }
    }

    /// Create a snapshot entry for any other live instance
    pub fn other(declared_type: impl Into<String>, instance: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            declared_type: declared_type.into(),
            instance: AnyInstance::Other(instance),
        }
    }
}

/// Enumeration capability supplied by the host application
///
/// `enumerate_instances` returns a snapshot, taken once per registration
/// pass, of every live instance the host process knows about. An `Err`
/// return fails the whole registration step for the workflow being
/// registered.
pub trait InstanceDiscovery: Send + Sync {
    fn enumerate_instances(&self) -> anyhow::Result<Vec<DiscoveredInstance>>;
}
