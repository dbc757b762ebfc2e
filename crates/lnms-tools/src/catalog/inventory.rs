//! Entity inventory

use super::HOSTNAME;
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const INVENTORY: &[&str] = &["librenms", "inventory", "read-only"];

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("inventory_device", HttpMethod::Get, "inventory/{hostname}", INVENTORY),
        "Get the entity inventory of a device.",
        &[
            HOSTNAME,
            ParamSpec::query(
                "ent_physical_class",
                "entPhysicalClass",
                ParamKind::String,
                "Filter by entity class (chassis, module, port, powerSupply, fan, sensor)",
            ),
            ParamSpec::query(
                "ent_physical_contained_in",
                "entPhysicalContainedIn",
                ParamKind::Integer,
                "Filter by parent entity index",
            ),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("inventory_device_flat", HttpMethod::Get, "inventory/{hostname}/all", INVENTORY),
        "Get the flattened entity inventory of a device.",
        &[HOSTNAME],
        BodyShape::None,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_use_wire_names() {
        let request = OPERATIONS[0]
            .build_request(&json!({
                "hostname": "sw1",
                "ent_physical_class": "fan",
                "ent_physical_contained_in": 3
            }))
            .unwrap();
        assert_eq!(
            request.query_pairs(),
            vec![("entPhysicalClass", "fan"), ("entPhysicalContainedIn", "3")]
        );
    }
}
