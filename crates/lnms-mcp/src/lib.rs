//! lnms-mcp: Model Context Protocol server for LibreNMS
//!
//! Every catalog operation is exposed as an MCP tool. Calls run through the
//! invocation pipeline (rate limiter, read-only gate, gateway) and always
//! answer with a well-formed tool result.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, McpRequest, McpResponse};
pub use server::{McpServer, McpServerConfig};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "LibreNMS MCP Server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
