//! Read-only gate
//!
//! When enabled, rejects every operation whose descriptor is mutating. The
//! decision looks only at the descriptor, never at the HTTP verb, so a
//! mutating GET (device rediscovery) is rejected as well.

use lnms_core::{ConnectionConfig, Error, OperationDescriptor, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOnlyGate {
    enabled: bool,
}

impl ReadOnlyGate {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(config.read_only_mode)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn check(&self, descriptor: &OperationDescriptor) -> Result<()> {
        if self.enabled && descriptor.mutating {
            warn!(operation = %descriptor.name, "Read-only mode: rejecting mutating operation");
            return Err(Error::policy_denied(descriptor.name));
        }
        debug!(operation = %descriptor.name, "Read-only gate passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnms_core::HttpMethod;

    const GET: OperationDescriptor =
        OperationDescriptor::read("device_get", HttpMethod::Get, "devices/{hostname}", &[]);
    const DELETE: OperationDescriptor =
        OperationDescriptor::write("device_delete", HttpMethod::Delete, "devices/{hostname}", &[], true, true);
    const DISCOVER: OperationDescriptor =
        OperationDescriptor::write("device_discover", HttpMethod::Get, "devices/{hostname}/discover", &[], false, false);

    #[test]
    fn test_disabled_gate_allows_everything() {
        let gate = ReadOnlyGate::default();
        assert!(gate.check(&GET).is_ok());
        assert!(gate.check(&DELETE).is_ok());
        assert!(gate.check(&DISCOVER).is_ok());
    }

    #[test]
    fn test_enabled_gate_rejects_mutating() {
        let gate = ReadOnlyGate::new(true);
        assert!(gate.check(&GET).is_ok());

        let err = gate.check(&DELETE).unwrap_err();
        assert_eq!(err, Error::policy_denied("device_delete"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_mutating_get_is_rejected() {
        let gate = ReadOnlyGate::new(true);
        assert!(gate.check(&DISCOVER).is_err());
    }

    #[test]
    fn test_from_config() {
        let mut config = ConnectionConfig::new("https://nms.example.net", "secret");
        assert!(!ReadOnlyGate::from_config(&config).is_enabled());
        config.read_only_mode = true;
        assert!(ReadOnlyGate::from_config(&config).is_enabled());
    }
}
