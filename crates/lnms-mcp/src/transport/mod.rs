//! Transport Layer
//!
//! Only stdio is provided; the traits keep the server independent of it.

mod stdio;

pub use stdio::StdioTransport;

use anyhow::Result;
use std::sync::Arc;

/// Anything that can answer MCP messages
#[async_trait::async_trait]
pub trait McpHandler: Send + Sync {
    /// `None` means no response is written (notifications)
    async fn handle_request(&self, request: crate::McpRequest) -> Option<crate::McpResponse>;
}

/// Transport trait - implement for new transport types
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Serve requests until the peer closes the stream
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()>;
}

#[async_trait::async_trait]
impl McpHandler for crate::McpServer {
    async fn handle_request(&self, request: crate::McpRequest) -> Option<crate::McpResponse> {
        self.handle_request(request).await
    }
}
