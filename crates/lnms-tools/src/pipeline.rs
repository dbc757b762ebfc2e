//! Invocation pipeline
//!
//! `Received -> rate limiter -> read-only gate -> parameter shaping ->
//! gateway -> result`. A rejection at any stage short-circuits: nothing
//! after it runs and no request is sent.

use crate::operation::OperationSpec;
use crate::policy::{RateLimiter, ReadOnlyGate, GLOBAL_KEY};
use crate::registry::OperationRegistry;
use lnms_client::{ApiRequest, BoxedGateway, Gateway, HttpGateway};
use lnms_core::{ConnectionConfig, Error, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Pipeline {
    config: Arc<ConnectionConfig>,
    registry: Arc<OperationRegistry>,
    gateway: BoxedGateway,
    rate_limiter: Option<RateLimiter>,
    gate: ReadOnlyGate,
}

impl Pipeline {
    /// Pipeline over an explicit gateway; policies come from `config`.
    pub fn new(
        config: Arc<ConnectionConfig>,
        registry: Arc<OperationRegistry>,
        gateway: BoxedGateway,
    ) -> Self {
        let rate_limiter = RateLimiter::from_config(&config);
        let gate = ReadOnlyGate::from_config(&config);

        info!(
            read_only = gate.is_enabled(),
            rate_limit = rate_limiter.is_some(),
            operations = registry.count(),
            "Invocation pipeline ready"
        );

        Self {
            config,
            registry,
            gateway,
            rate_limiter,
            gate,
        }
    }

    /// Pipeline with the full catalog and the HTTP gateway
    pub fn from_config(config: Arc<ConnectionConfig>) -> Result<Self> {
        let registry = Arc::new(OperationRegistry::with_catalog()?);
        let gateway: BoxedGateway = Arc::new(HttpGateway::new(config.clone()));
        Ok(Self::new(config, registry, gateway))
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn read_only(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value> {
        self.invoke_as(GLOBAL_KEY, name, arguments).await
    }

    /// Run one invocation with its rate-limit slot charged to `caller`.
    pub async fn invoke_as(&self, caller: &str, name: &str, arguments: Value) -> Result<Value> {
        let spec = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownOperation(name.to_string()))?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.try_acquire(caller).await?;
        }

        self.gate.check(&spec.descriptor)?;

        let request = spec.build_request(&arguments)?;
        self.send(spec, request).await
    }

    /// Like [`Pipeline::invoke`], folded into the uniform result shape.
    pub async fn call(&self, name: &str, arguments: Value) -> Value {
        lnms_core::uniform(self.invoke(name, arguments).await)
    }

    async fn send(&self, spec: &OperationSpec, request: ApiRequest) -> Result<Value> {
        let started = Instant::now();
        debug!(operation = %spec.name(), method = %request.method, "Dispatching operation");

        let outcome = self.gateway.send(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(_) => debug!(operation = %spec.name(), elapsed_ms, "Operation succeeded"),
            Err(e) => warn!(operation = %spec.name(), elapsed_ms, error = %e, "Operation failed"),
        }
        outcome
    }
}
