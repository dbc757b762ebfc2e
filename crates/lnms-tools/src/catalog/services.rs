//! Service checks

use super::HOSTNAME;
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const SERVICES: &[&str] = &["librenms", "services", "read-only", "global-read"];
const SERVICES_ADMIN: &[&str] = &["librenms", "services", "admin"];

const STATE: ParamSpec =
    ParamSpec::query("state", "state", ParamKind::Integer, "Filter by state: 0=Ok, 1=Warning, 2=Critical");
const SERVICE_TYPE: ParamSpec =
    ParamSpec::query("service_type", "type", ParamKind::String, "Filter by service type (SQL LIKE pattern)");
const SERVICE_ID: ParamSpec = ParamSpec::path("service_id", ParamKind::Id, "Service ID");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("services_list", HttpMethod::Get, "services", SERVICES),
        "List all services with optional filters.",
        &[STATE, SERVICE_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("services_for_device", HttpMethod::Get, "services/{hostname}", SERVICES),
        "List services of a device.",
        &[HOSTNAME, STATE, SERVICE_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("service_add", HttpMethod::Post, "services/{hostname}", SERVICES_ADMIN, true, false),
        "Add a service check to a device.",
        &[
            HOSTNAME,
            ParamSpec::payload(
                "Service fields: type (required, e.g. http, icmp), ip (required), desc, param, ignore, disabled",
            ),
        ],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("service_edit", HttpMethod::Patch, "services/{service_id}", SERVICES_ADMIN, true, true),
        "Edit a service by ID.",
        &[
            SERVICE_ID,
            ParamSpec::payload(
                "Fields to change: service_ip, service_desc, service_param, service_ignore, service_disabled",
            ),
        ],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("service_delete", HttpMethod::Delete, "services/{service_id}", SERVICES_ADMIN, true, true),
        "Delete a service by ID.",
        &[SERVICE_ID],
        BodyShape::None,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_type_sent_as_type() {
        let request = OPERATIONS[0]
            .build_request(&json!({"service_type": "http%", "state": 2}))
            .unwrap();
        let mut pairs = request.query_pairs();
        pairs.sort();
        assert_eq!(pairs, vec![("state", "2"), ("type", "http%")]);
    }
}
