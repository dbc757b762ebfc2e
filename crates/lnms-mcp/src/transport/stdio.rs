//! Stdio Transport
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Each message is handled on
//! its own task, so a slow LibreNMS call does not hold up the others;
//! responses are written by a single writer as they complete.
//!
//! In-flight requests are tracked by id. A `notifications/cancelled` for one
//! of them aborts its task, which drops the pending gateway call and with it
//! the HTTP connection. Aborted requests get no response.

use super::{McpHandler, Transport};
use crate::{McpRequest, McpResponse};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Abort handles of running requests, keyed by the JSON text of their id
type InFlight = Arc<Mutex<HashMap<String, AbortHandle>>>;

/// Stdio transport - reads JSON-RPC from stdin, writes to stdout
#[derive(Debug, Default)]
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Serve over arbitrary streams until `reader` reaches EOF.
    pub async fn serve_io<H, R, W>(handler: Arc<H>, reader: R, mut writer: W) -> Result<()>
    where
        H: McpHandler + 'static,
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<McpResponse>();
        let in_flight: InFlight = Arc::default();
        let mut lines = reader.lines();

        let read_loop = async move {
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(request = %line, "Received message");

                let request = match McpRequest::parse(line) {
                    Ok(request) => request,
                    Err(response) => {
                        warn!(error = ?response.error, "Rejected malformed message");
                        // Receiver only goes away on write failure
                        let _ = tx.send(response);
                        continue;
                    }
                };

                if let Some(target) = request.cancelled_request_id() {
                    abort_request(&in_flight, target).await;
                }
                dispatch(&handler, &in_flight, &tx, request).await;
            }
            drop(tx);
            Ok::<_, anyhow::Error>(())
        };

        let write_loop = async {
            while let Some(response) = rx.recv().await {
                let response_json = serde_json::to_string(&response)?;
                debug!(response = %response_json, "Sending response");
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok::<_, anyhow::Error>(())
        };

        // The writer finishes once the reader and every in-flight task
        // have dropped their senders.
        tokio::try_join!(read_loop, write_loop)?;
        Ok(())
    }
}

/// Run one message on its own task, registering it for cancellation.
async fn dispatch<H: McpHandler + 'static>(
    handler: &Arc<H>,
    in_flight: &InFlight,
    tx: &mpsc::UnboundedSender<McpResponse>,
    request: McpRequest,
) {
    let key = request.id.as_ref().map(Value::to_string);

    let handler = handler.clone();
    let tx = tx.clone();
    let registry = in_flight.clone();
    let task_key = key.clone();

    // Held across the spawn so the task cannot deregister before it is registered
    let mut running = in_flight.lock().await;
    let task = tokio::spawn(async move {
        let response = handler.handle_request(request).await;
        if let Some(key) = task_key {
            registry.lock().await.remove(&key);
        }
        if let Some(response) = response {
            let _ = tx.send(response);
        }
    });
    if let Some(key) = key {
        running.insert(key, task.abort_handle());
    }
}

async fn abort_request(in_flight: &InFlight, target: &Value) {
    match in_flight.lock().await.remove(&target.to_string()) {
        Some(task) => {
            task.abort();
            info!(request_id = %target, "Aborted in-flight request");
        }
        None => debug!(request_id = %target, "Cancel for a request that is not running"),
    }
}

#[async_trait::async_trait]
impl Transport for StdioTransport {
    async fn serve<H: McpHandler + 'static>(self, handler: Arc<H>) -> Result<()> {
        info!("Starting MCP stdio transport");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        Self::serve_io(handler, stdin, stdout).await?;

        info!("Stdio transport shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Notify;

    struct Echo;

    #[async_trait::async_trait]
    impl McpHandler for Echo {
        async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
            if request.is_notification() {
                return None;
            }
            Some(McpResponse::success(request.id, json!({ "method": request.method })))
        }
    }

    /// `slow` never finishes on its own; everything else answers at once
    #[derive(Default)]
    struct Slow {
        started: Notify,
        dropped: Notify,
    }

    struct SignalOnDrop<'a>(&'a Notify);

    impl Drop for SignalOnDrop<'_> {
        fn drop(&mut self) {
            self.0.notify_one();
        }
    }

    #[async_trait::async_trait]
    impl McpHandler for Slow {
        async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
            if request.is_notification() {
                return None;
            }
            if request.method == "slow" {
                let _signal = SignalOnDrop(&self.dropped);
                self.started.notify_one();
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Some(McpResponse::success(request.id, json!({ "method": request.method })))
        }
    }

    fn decode(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    async fn run(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        StdioTransport::serve_io(Arc::new(Echo), input.as_bytes(), &mut output)
            .await
            .unwrap();
        decode(output)
    }

    #[tokio::test]
    async fn test_one_response_per_request() {
        let responses = run(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        ))
        .await;

        assert_eq!(responses.len(), 2);
        let mut ids: Vec<i64> = responses.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_notifications_are_silent() {
        let responses = run(concat!(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":9,"method":"ping"}"#,
            "\n",
        ))
        .await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 9);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let responses = run("{not json}\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert!(responses[0].get("id").is_none());
    }

    #[tokio::test]
    async fn test_request_without_method_is_invalid() {
        let responses = run("{\"jsonrpc\":\"2.0\",\"id\":1}\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let handler = Arc::new(Slow::default());
        let (mut client, server_end) = tokio::io::duplex(4096);
        let mut output = Vec::new();

        let serve = StdioTransport::serve_io(handler.clone(), BufReader::new(server_end), &mut output);
        let watcher = handler.clone();
        let drive = async move {
            client
                .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"slow\"}\n")
                .await
                .unwrap();
            watcher.started.notified().await;

            client
                .write_all(
                    b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/cancelled\",\"params\":{\"requestId\":1}}\n",
                )
                .await
                .unwrap();
            client
                .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n")
                .await
                .unwrap();

            tokio::time::timeout(Duration::from_secs(5), watcher.dropped.notified())
                .await
                .expect("cancelled request is dropped");
            drop(client);
        };

        let (served, ()) = tokio::join!(serve, drive);
        served.unwrap();

        // Only the ping answers; the aborted request stays silent
        let responses = decode(output);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 2);
    }
}
