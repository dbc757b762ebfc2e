//! Core types for librenms-mcp
//!
//! # Modules
//!
//! - `config`: Connection config and environment loading
//! - `error`: Error taxonomy and Result alias
//! - `descriptor`: Static operation metadata consumed by the policies

pub mod config;
pub mod descriptor;
pub mod error;

use serde_json::{json, Value};

// Re-exports
pub use config::ConnectionConfig;
pub use descriptor::{HttpMethod, OperationDescriptor};
pub use error::{Error, Result};

/// Fold an invocation outcome into the uniform caller-facing shape.
///
/// Success passes the upstream payload through verbatim; any error becomes
/// `{"error": "<message>"}`.
pub fn uniform(outcome: Result<Value>) -> Value {
    match outcome {
        Ok(payload) => payload,
        Err(e) => error_value(&e),
    }
}

/// `{"error": "<message>"}` for an error
pub fn error_value(err: &Error) -> Value {
    json!({ "error": err.to_string() })
}

/// True when a uniform value is the error shape
pub fn is_error_value(value: &Value) -> bool {
    value
        .as_object()
        .map(|o| o.len() == 1 && o.get("error").map_or(false, Value::is_string))
        .unwrap_or(false)
}
