//! # Configuration
//!
//! Typed configuration for the engine connection, each workflow, and the
//! subscription knobs passed through to the engine client.
//!
//! A [`ConnectionConfig`] is validated once at process start and shared
//! read-only by every workflow registered against the same engine connection.
//! A [`WorkflowConfig`] is owned by one deployment step and never mutated
//! after validation.

use crate::error::{FlowbindError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Authentication strategy for the engine connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthStrategy {
    Oauth,
    Basic,
    Bearer,
    Cookie,
    None,
}

impl AuthStrategy {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "OAUTH" => Ok(Self::Oauth),
            "BASIC" => Ok(Self::Basic),
            "BEARER" => Ok(Self::Bearer),
            "COOKIE" => Ok(Self::Cookie),
            "NONE" => Ok(Self::None),
            other => Err(FlowbindError::configuration(format!(
                "authStrategy must be one of: OAUTH, BASIC, BEARER, COOKIE, NONE (got '{other}')"
            ))),
        }
    }
}

/// Connection and authentication configuration for one engine connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub auth_strategy: AuthStrategy,
    /// Engine gRPC address, e.g. `grpc://localhost:26500`
    pub grpc_address: String,
    /// Engine REST address, e.g. `http://localhost:8088`
    pub rest_address: String,
    pub client_id: String,
    pub client_secret: String,
    /// OAuth token endpoint
    pub oauth_url: String,
    pub token_cache_dir: Option<String>,
    pub token_disk_cache_disable: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            auth_strategy: AuthStrategy::None,
            grpc_address: "grpc://localhost:26500".to_string(),
            rest_address: "http://localhost:8088".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            oauth_url: String::new(),
            token_cache_dir: None,
            token_disk_cache_disable: false,
        }
    }
}

impl ConnectionConfig {
    /// Build a connection configuration from `FLOWBIND_*` environment
    /// variables, falling back to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(strategy) = std::env::var("FLOWBIND_AUTH_STRATEGY") {
            config.auth_strategy = AuthStrategy::parse(&strategy)?;
        }
        if let Ok(address) = std::env::var("FLOWBIND_GRPC_ADDRESS") {
            config.grpc_address = address;
        }
        if let Ok(address) = std::env::var("FLOWBIND_REST_ADDRESS") {
            config.rest_address = address;
        }
        if let Ok(client_id) = std::env::var("FLOWBIND_CLIENT_ID") {
            config.client_id = client_id;
        }
        if let Ok(client_secret) = std::env::var("FLOWBIND_CLIENT_SECRET") {
            config.client_secret = client_secret;
        }
        if let Ok(oauth_url) = std::env::var("FLOWBIND_OAUTH_URL") {
            config.oauth_url = oauth_url;
        }
        if let Ok(dir) = std::env::var("FLOWBIND_TOKEN_CACHE_DIR") {
            config.token_cache_dir = Some(dir);
        }
        if let Ok(disable) = std::env::var("FLOWBIND_TOKEN_DISK_CACHE_DISABLE") {
            config.token_disk_cache_disable = disable.parse().map_err(|e| {
                FlowbindError::configuration(format!("Invalid token_disk_cache_disable: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate addresses and credentials. Synchronous and side-effect-free;
    /// never touches the network.
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.grpc_address, "grpc_address", &["grpc", "grpcs"])?;
        validate_address(&self.rest_address, "rest_address", &["http", "https"])?;

        if self.auth_strategy == AuthStrategy::Oauth {
            if self.client_id.is_empty() {
                return Err(FlowbindError::configuration(
                    "client_id is required when auth_strategy is OAUTH",
                ));
            }
            if self.client_secret.is_empty() {
                return Err(FlowbindError::configuration(
                    "client_secret is required when auth_strategy is OAUTH",
                ));
            }
            validate_address(&self.oauth_url, "oauth_url", &["http", "https"])?;
        }

        Ok(())
    }
}

fn validate_address(value: &str, field: &str, schemes: &[&str]) -> Result<()> {
    if value.is_empty() {
        return Err(FlowbindError::configuration(format!(
            "{field} is required"
        )));
    }

    let url = Url::parse(value)
        .map_err(|e| FlowbindError::configuration(format!("{field} is not a valid URL: {e}")))?;

    if !schemes.contains(&url.scheme()) {
        return Err(FlowbindError::configuration(format!(
            "{field} must use one of the schemes {schemes:?} (got '{}')",
            url.scheme()
        )));
    }

    Ok(())
}

/// Deployment configuration for one workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Unique workflow name linking handlers to this workflow
    pub workflow_name: String,
    /// Path to the process definition file to deploy
    pub process_definition: PathBuf,
    /// Form files to deploy alongside the definition, in declared order
    pub forms: Vec<PathBuf>,
}

impl WorkflowConfig {
    pub fn new(workflow_name: impl Into<String>, process_definition: impl Into<PathBuf>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            process_definition: process_definition.into(),
            forms: Vec::new(),
        }
    }

    pub fn with_forms(mut self, forms: Vec<PathBuf>) -> Self {
        self.forms = forms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workflow_name.is_empty() {
            return Err(FlowbindError::configuration("workflow_name is required"));
        }
        if self.process_definition.as_os_str().is_empty() {
            return Err(FlowbindError::configuration(
                "process_definition file path is required",
            ));
        }
        if self.forms.iter().any(|f| f.as_os_str().is_empty()) {
            return Err(FlowbindError::configuration(
                "form file paths cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Subscription knobs passed through to the engine client for every worker
/// opened in one registration pass
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    /// Identity reported to the engine for this worker process
    pub worker_identity: Option<String>,
    /// Maximum jobs the engine client may run concurrently per subscription
    pub max_concurrent_jobs: usize,
    /// Per-activation timeout handed to the engine client
    pub request_timeout: Option<Duration>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            worker_identity: None,
            max_concurrent_jobs: 32,
            request_timeout: None,
        }
    }
}
