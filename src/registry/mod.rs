//! # Binding Registry
//!
//! Explicit process-wide mapping from handler-type identifier to
//! [`BindingMetadata`]. Populated by `bind` calls at startup, read by the
//! worker registration step's discovery pass. Binding must occur before the
//! registration pass runs, or the handler is invisible to that pass.

pub mod binding_registry;

pub use binding_registry::{BindingEntry, BindingMetadata, BindingRegistry, RegistryStats};
