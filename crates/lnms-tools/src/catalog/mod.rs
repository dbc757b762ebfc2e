//! Operation catalog
//!
//! Every LibreNMS operation exposed by the gateway, grouped by API area.
//! Each area module exports a static `OPERATIONS` table; [`load_all`]
//! registers all of them at startup.

pub mod alerts;
pub mod bills;
pub mod devices;
pub mod health;
pub mod inventory;
pub mod locations;
pub mod logs;
pub mod network;
pub mod pollers;
pub mod ports;
pub mod services;
pub mod system;

use crate::operation::{OperationSpec, ParamKind, ParamSpec};
use crate::registry::OperationRegistry;
use lnms_core::Result;
use tracing::{debug, info};

/// All catalog areas with their tables
pub const AREAS: &[(&str, &[OperationSpec])] = &[
    ("alerts", alerts::OPERATIONS),
    ("bills", bills::OPERATIONS),
    ("devices", devices::OPERATIONS),
    ("health", health::OPERATIONS),
    ("inventory", inventory::OPERATIONS),
    ("locations", locations::OPERATIONS),
    ("logs", logs::OPERATIONS),
    ("network", network::OPERATIONS),
    ("pollers", pollers::OPERATIONS),
    ("ports", ports::OPERATIONS),
    ("services", services::OPERATIONS),
    ("system", system::OPERATIONS),
];

/// Iterate every operation in the catalog
pub fn all() -> impl Iterator<Item = &'static OperationSpec> {
    AREAS.iter().flat_map(|(_, ops)| ops.iter())
}

/// Register the whole catalog
pub fn load_all(registry: &mut OperationRegistry) -> Result<usize> {
    let mut count = 0;
    for (area, operations) in AREAS {
        debug!("Loading {} operations...", area);
        for spec in operations.iter() {
            registry.register(spec)?;
        }
        count += operations.len();
    }
    info!("Loaded {} LibreNMS operations", count);
    Ok(count)
}

// Parameters shared by several areas

pub(crate) const HOSTNAME: ParamSpec =
    ParamSpec::path("hostname", ParamKind::String, "Device hostname or ID");

pub(crate) const MAINTENANCE_PAYLOAD: ParamSpec = ParamSpec::payload(
    "Maintenance payload: duration (required, \"H:i\", e.g. \"02:00\"), \
     title, notes, start (\"Y-m-d H:i:00\")",
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in all() {
            assert!(seen.insert(spec.name()), "duplicate operation {}", spec.name());
        }
        assert_eq!(seen.len(), 97);
    }

    #[test]
    fn test_path_params_match_placeholders() {
        for spec in all() {
            let mut placeholders = spec.descriptor.path_placeholders();
            let mut path_params: Vec<&str> = spec
                .params
                .iter()
                .filter(|p| p.location == crate::operation::ParamLocation::Path)
                .map(|p| p.name)
                .collect();
            placeholders.sort_unstable();
            path_params.sort_unstable();
            assert_eq!(placeholders, path_params, "{}", spec.name());
        }
    }

    #[test]
    fn test_path_params_are_required() {
        for spec in all() {
            for param in spec.params {
                if param.location == crate::operation::ParamLocation::Path {
                    assert!(param.required, "{}.{}", spec.name(), param.name);
                }
            }
        }
    }

    #[test]
    fn test_read_operations_are_not_destructive() {
        for spec in all().filter(|s| !s.descriptor.mutating) {
            assert!(!spec.descriptor.destructive, "{}", spec.name());
            assert!(spec.descriptor.idempotent, "{}", spec.name());
        }
    }

    #[test]
    fn test_every_operation_is_tagged() {
        for spec in all() {
            assert!(spec.descriptor.has_tag("librenms"), "{}", spec.name());
            assert!(!spec.description.is_empty(), "{}", spec.name());
        }
    }

    #[test]
    fn test_load_all() {
        let mut registry = OperationRegistry::new();
        let count = load_all(&mut registry).unwrap();
        assert_eq!(count, registry.count());
        assert!(registry.get("device_delete").is_some());
    }
}
