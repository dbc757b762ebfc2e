//! JSON-RPC 2.0 message types spoken by the MCP server
//!
//! Incoming lines go through [`McpRequest::parse`], which separates bytes
//! that are not JSON (-32700) from JSON that is not a request (-32600) and
//! keeps the request id for the latter whenever one can be read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// Notification a client sends to abandon one of its requests
pub const CANCELLED_NOTIFICATION: &str = "notifications/cancelled";

/// Request or notification from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl McpRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: method.into(),
            params: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Decode one wire message, or the error response it deserves.
    pub fn parse(line: &str) -> Result<Self, McpResponse> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| McpResponse::error(None, JsonRpcError::parse_error(e.to_string())))?;

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        let invalid = |reason: String| McpResponse::error(id.clone(), JsonRpcError::invalid_request(reason));

        match value.get("jsonrpc").and_then(Value::as_str) {
            Some(JSONRPC_VERSION) => {}
            Some(other) => return Err(invalid(format!("unsupported jsonrpc version '{}'", other))),
            None => return Err(invalid("missing jsonrpc version".to_string())),
        }

        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
    }

    /// Requests without an id are notifications and get no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Id of the request a `notifications/cancelled` message targets
    pub fn cancelled_request_id(&self) -> Option<&Value> {
        if self.method != CANCELLED_NOTIFICATION {
            return None;
        }
        self.params.as_ref()?.get("requestId")
    }
}

/// Reply to a request: exactly one of `result` or `error`
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, result: Some(result), error: None }
    }

    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, result: None, error: Some(error) }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self { code: PARSE_ERROR, message: msg.into() }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self { code: INVALID_REQUEST, message: msg.into() }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self { code: METHOD_NOT_FOUND, message: format!("Method not found: {}", method) }
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self { code: INVALID_PARAMS, message: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request() {
        let req = McpRequest::parse(
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"ping"}}"#,
        )
        .unwrap();
        assert_eq!(req.id, Some(json!(7)));
        assert_eq!(req.params.unwrap()["name"], "ping");
    }

    #[test]
    fn test_parse_notification() {
        let req = McpRequest::parse(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(req.is_notification());
        assert!(!McpRequest::new("ping").with_id(1).is_notification());
    }

    #[test]
    fn test_not_json_is_parse_error() {
        let resp = McpRequest::parse("{oops").unwrap_err();
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
        assert!(resp.id.is_none());
    }

    #[test]
    fn test_missing_method_is_invalid_request() {
        let resp = McpRequest::parse(r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert_eq!(resp.id, Some(json!(1)));
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn test_wrong_version_is_invalid_request() {
        let resp = McpRequest::parse(r#"{"jsonrpc":"1.0","id":"a","method":"ping"}"#).unwrap_err();
        assert_eq!(resp.id, Some(json!("a")));
        let error = resp.error.unwrap();
        assert_eq!(error.code, INVALID_REQUEST);
        assert!(error.message.contains("1.0"));

        let resp = McpRequest::parse(r#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#).unwrap_err();
        assert!(resp.id.is_none());
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn test_cancelled_request_id() {
        let cancel = McpRequest::new(CANCELLED_NOTIFICATION).with_params(json!({"requestId": 4}));
        assert_eq!(cancel.cancelled_request_id(), Some(&json!(4)));

        let other = McpRequest::new("tools/call").with_params(json!({"requestId": 4}));
        assert!(other.cancelled_request_id().is_none());
        assert!(McpRequest::new(CANCELLED_NOTIFICATION).cancelled_request_id().is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let resp = McpResponse::error(Some(json!(1)), JsonRpcError::method_not_found("unknown"));
        assert!(!resp.is_success());

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["error"]["code"], METHOD_NOT_FOUND);
        assert!(value.get("result").is_none());
    }
}
