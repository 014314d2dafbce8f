//! # Engine Client Facade
//!
//! The minimal surface the coordinator needs from the remote workflow engine:
//! deploy resource files, open and close job subscriptions, start process
//! instances. Transport and auth plumbing live behind the [`EngineClient`]
//! trait, which the host application implements over its pre-configured
//! engine connection.

pub mod client;
pub mod job;

pub use client::{
    DeploymentResult, EngineClient, EngineError, JobDispatch, SubscriptionHandle,
    SubscriptionRequest,
};
pub use job::{Acknowledgement, Job, Variables};
