//! Request gateway
//!
//! Turns one logical API call into exactly one HTTP request against the
//! configured LibreNMS instance and maps every outcome onto
//! `lnms_core::Result<Value>`.
//!
//! Each call builds its own client with pooling disabled, so the connection
//! lives no longer than the `send` future. Dropping the future (cancellation)
//! drops the client and closes the socket.

use crate::path::render_path;
use async_trait::async_trait;
use lnms_core::{ConnectionConfig, Error, HttpMethod, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Header carrying the LibreNMS API token (`X-Auth-Token`)
pub const AUTH_HEADER: &str = "x-auth-token";

/// Longest upstream diagnostic text kept in an error message
const MAX_DIAGNOSTIC_LEN: usize = 512;

/// One logical request to the API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path_template: &'static str,
    pub path_params: BTreeMap<String, String>,
    /// Query pairs; `None` values are left out of the query string
    pub query: Vec<(String, Option<String>)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path_template: &'static str) -> Self {
        Self {
            method,
            path_template,
            path_params: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path_template: &'static str) -> Self {
        Self::new(HttpMethod::Get, path_template)
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.query.push((name.into(), value));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Rendered, percent-encoded path relative to the API root
    pub fn path(&self) -> Result<String> {
        render_path(self.path_template, &self.path_params)
    }

    /// Query pairs that actually carry a value
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
            .collect()
    }
}

/// Anything that can execute an [`ApiRequest`]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

pub type BoxedGateway = Arc<dyn Gateway>;

/// Gateway backed by reqwest
pub struct HttpGateway {
    config: Arc<ConnectionConfig>,
}

impl HttpGateway {
    pub fn new(config: Arc<ConnectionConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Build the per-call client
    fn client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&self.config.token)
            .map_err(|_| Error::config("API token contains invalid header characters"))?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static(AUTH_HEADER), token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout())
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(!self.config.verify_ssl)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {}", e)))
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                seconds: self.config.timeout_seconds,
            }
        } else {
            Error::transport(describe(&err))
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let path = request.path()?;
        let url = format!("{}/{}", self.config.api_root(), path);
        let client = self.client()?;

        debug!(method = %request.method, path = %path, "Sending LibreNMS request");

        let mut builder = client
            .request(to_reqwest_method(request.method), &url)
            .query(&request.query_pairs());

        if let Some(body) = &request.body {
            if request.method.allows_body() {
                builder = builder.json(body);
            } else {
                debug!(method = %request.method, "Dropping body for bodiless method");
            }
        }

        let response = builder.send().await.map_err(|e| {
            let mapped = self.map_send_error(e);
            error!(path = %path, error = %mapped, "LibreNMS request failed");
            mapped
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        if status.is_success() {
            Ok(decode_success(status, &bytes))
        } else {
            let message = diagnostic(status, &bytes);
            warn!(path = %path, status = status.as_u16(), message = %message, "LibreNMS returned an error status");
            Err(Error::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// 2xx body: decoded JSON, or an empty object when absent or unparseable
fn decode_success(status: StatusCode, bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return json!({});
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "Unparseable success body, returning empty payload");
            json!({})
        }
    }
}

/// Diagnostic text for a non-2xx response
fn diagnostic(status: StatusCode, bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }

    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if !text.is_empty() {
        return text.chars().take(MAX_DIAGNOSTIC_LEN).collect();
    }

    status_line(status)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Flatten a reqwest error and its sources into one line
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpGateway {
        let mut config = ConnectionConfig::new(server.uri(), "test-token");
        config.timeout_seconds = 2;
        HttpGateway::new(Arc::new(config))
    }

    #[tokio::test]
    async fn test_get_success_with_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/devices/core1"))
            .and(header("X-Auth-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "devices": [{"hostname": "core1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway_for(&server)
            .send(ApiRequest::get("devices/{hostname}").with_path_param("hostname", "core1"))
            .await
            .unwrap();

        assert_eq!(result["devices"][0]["hostname"], "core1");
    }

    #[tokio::test]
    async fn test_reserved_characters_reach_server_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/devices/core1/ports/Gi0%2F1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"port": []})))
            .expect(1)
            .mount(&server)
            .await;

        let request = ApiRequest::get("devices/{hostname}/ports/{ifname}")
            .with_path_param("hostname", "core1")
            .with_path_param("ifname", "Gi0/1");
        let result = gateway_for(&server).send(request).await.unwrap();

        assert_eq!(result, json!({"port": []}));
    }

    #[tokio::test]
    async fn test_absent_query_values_are_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/alerts"))
            .and(query_param("state", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"alerts": []})))
            .mount(&server)
            .await;

        let request = ApiRequest::get("alerts")
            .with_query("state", Some("1".into()))
            .with_query("severity", None);
        gateway_for(&server).send(request).await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.query(), Some("state=1"));
    }

    #[tokio::test]
    async fn test_body_sent_for_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v0/devicegroups/edge/devices"))
            .and(body_json(json!({"devices": [1, 2]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let request = ApiRequest::new(HttpMethod::Delete, "devicegroups/{name}/devices")
            .with_path_param("name", "edge")
            .with_body(json!({"devices": [1, 2]}));
        let result = gateway_for(&server).send(request).await.unwrap();

        assert_eq!(result["status"], "ok");
    }

    #[tokio::test]
    async fn test_body_dropped_for_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/system"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"system": []})))
            .mount(&server)
            .await;

        gateway_for(&server)
            .send(ApiRequest::get("system").with_body(json!({"ignored": true})))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_empty_success_body_is_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v0/alerts/unmute/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let request = ApiRequest::new(HttpMethod::Put, "alerts/unmute/{alert_id}")
            .with_path_param("alert_id", "7");
        let result = gateway_for(&server).send(request).await.unwrap();

        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>pong</html>"))
            .mount(&server)
            .await;

        let result = gateway_for(&server).send(ApiRequest::get("ping")).await.unwrap();
        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn test_not_found_carries_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/devices/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "message": "not found"
            })))
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .send(ApiRequest::get("devices/{hostname}").with_path_param("hostname", "ghost"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            Error::Upstream {
                status: 404,
                message: "not found".into()
            }
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/system"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable\n"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).send(ApiRequest::get("system")).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: database unavailable");
    }

    #[tokio::test]
    async fn test_empty_error_body_falls_back_to_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/system"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway_for(&server).send(ApiRequest::get("system")).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0/system"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = ConnectionConfig::new(server.uri(), "test-token");
        config.timeout_seconds = 1;
        let gateway = HttpGateway::new(Arc::new(config));

        let err = gateway.send(ApiRequest::get("system")).await.unwrap_err();
        assert_eq!(err, Error::Timeout { seconds: 1 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ConnectionConfig::new(format!("http://{}", addr), "test-token");
        let gateway = HttpGateway::new(Arc::new(config));

        let err = gateway.send(ApiRequest::get("system")).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_path_param_sends_nothing() {
        let server = MockServer::start().await;

        let err = gateway_for(&server)
            .send(ApiRequest::get("devices/{hostname}"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidParams(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dot_only_identifiers_never_reach_server() {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);

        for hostname in ["..", "."] {
            let request = ApiRequest::new(HttpMethod::Delete, "devices/{hostname}")
                .with_path_param("hostname", hostname);
            let err = gateway.send(request).await.unwrap_err();
            assert!(matches!(err, Error::InvalidParams(_)));
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
