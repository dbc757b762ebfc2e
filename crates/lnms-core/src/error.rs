//! Error types for librenms-mcp
//!
//! Every failure an invocation can hit is one of these variants. Nothing is
//! raised past the pipeline: callers fold the error into the uniform
//! `{"error": "..."}` shape with [`crate::uniform`].

use std::time::Duration;
use thiserror::Error;

/// Main error type for gateway and policy operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Operation '{operation}' is not permitted: server is running in read-only mode")]
    PolicyDenied { operation: String },

    #[error("Rate limit exceeded: {max_requests} requests per {window_minutes} minute(s){}", retry_hint(.retry_after))]
    RateLimited {
        max_requests: u32,
        window_minutes: u32,
        retry_after: Option<Duration>,
    },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(wait) => {
            // Never advertise less than the remaining wait
            let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            format!(", retry after {}s", secs.max(1))
        }
        None => String::new(),
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a policy denial for the named operation
    pub fn policy_denied(operation: impl Into<String>) -> Self {
        Error::PolicyDenied {
            operation: operation.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create an invalid parameters error
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Error::InvalidParams(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
