//! MCP Server
//!
//! Protocol logic only; transport-agnostic. Tool calls are delegated to the
//! invocation pipeline and always come back as a tool result, with
//! `isError` set when the uniform result is the error shape.

use crate::protocol::{JsonRpcError, McpRequest, McpResponse, CANCELLED_NOTIFICATION};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
use lnms_tools::{OperationDefinition, Pipeline};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_INSTRUCTIONS: &str = "This server exposes tools for the LibreNMS API, \
     supporting read and write operations unless it runs in read-only mode.";

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct McpServerConfig {
    /// Server name override
    pub name: Option<String>,
    /// Instructions override
    pub instructions: Option<String>,
}

/// Tool information for MCP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    pub annotations: Value,
}

impl From<OperationDefinition> for ToolInfo {
    fn from(def: OperationDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            input_schema: def.input_schema,
            annotations: def.annotations,
        }
    }
}

pub struct McpServer {
    config: McpServerConfig,
    pipeline: Arc<Pipeline>,
}

impl McpServer {
    pub fn new(config: McpServerConfig, pipeline: Arc<Pipeline>) -> Self {
        Self { config, pipeline }
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    /// Handle one message; `None` for notifications.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, "Handling MCP request");

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => McpResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => McpResponse::error(request.id, JsonRpcError::method_not_found(&request.method)),
        };
        Some(response)
    }

    fn handle_notification(&self, request: &McpRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => info!("Client initialization complete"),
            CANCELLED_NOTIFICATION => info!(
                request_id = ?request.cancelled_request_id(),
                "Client cancelled a request"
            ),
            other => debug!(method = %other, "Ignoring notification"),
        }
    }

    fn handle_initialize(&self, request: McpRequest) -> McpResponse {
        let client_info = request.params.as_ref().and_then(|p| p.get("clientInfo"));
        let client_name = client_info
            .and_then(|ci| ci.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let client_version = client_info
            .and_then(|ci| ci.get("version"))
            .and_then(Value::as_str);

        info!(
            client = %client_name,
            version = %client_version.unwrap_or("?"),
            "Client connected"
        );

        let server_name = self.config.name.as_deref().unwrap_or(SERVER_NAME);
        let instructions = self.config.instructions.as_deref().unwrap_or(DEFAULT_INSTRUCTIONS);

        McpResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": server_name,
                    "version": SERVER_VERSION
                },
                "instructions": instructions
            }),
        )
    }

    fn handle_tools_list(&self, request: McpRequest) -> McpResponse {
        let tools: Vec<ToolInfo> = self
            .pipeline
            .registry()
            .list(self.pipeline.read_only())
            .into_iter()
            .map(ToolInfo::from)
            .collect();

        debug!(count = tools.len(), "Listing tools");
        McpResponse::success(request.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: McpRequest) -> McpResponse {
        let params = match &request.params {
            Some(p) => p,
            None => {
                return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing params"))
            }
        };

        let tool_name = match params.get("name").and_then(Value::as_str) {
            Some(n) => n,
            None => {
                return McpResponse::error(request.id, JsonRpcError::invalid_params("Missing tool name"))
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        let result = self.pipeline.call(tool_name, arguments).await;
        let is_error = lnms_core::is_error_value(&result);
        if is_error {
            warn!(tool = %tool_name, result = %result, "Tool call returned an error");
        }

        McpResponse::success(request.id, tool_result(result, is_error))
    }
}

/// Wrap a uniform result as MCP tool content
fn tool_result(result: Value, is_error: bool) -> Value {
    let text = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
    let mut content = json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    });
    if result.is_object() {
        content["structuredContent"] = result;
    }
    content
}
