//! Devices and device groups

use super::{HOSTNAME, MAINTENANCE_PAYLOAD};
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const DEVICES: &[&str] = &["librenms", "devices", "read-only"];
const DEVICES_ADMIN: &[&str] = &["librenms", "devices", "admin"];
const DEVICES_WRITE: &[&str] = &["librenms", "devices"];
const GROUPS: &[&str] = &["librenms", "device-groups", "read-only", "global-read"];
const GROUPS_ADMIN: &[&str] = &["librenms", "device-groups", "admin"];

const GROUP_NAME: ParamSpec = ParamSpec::path("name", ParamKind::String, "Device group name");

const DEVICE_IDS: &str = "Device IDs, as {\"devices\": [1, 2, 3]}";

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("devices_list", HttpMethod::Get, "devices", DEVICES),
        "List devices with optional filters.",
        &[ParamSpec::query_map(
            "query",
            "Filters passed as query parameters, e.g. {\"type\": \"os\", \"query\": \"linux\"}, \
             {\"type\": \"down\"}, {\"limit\": 50}, {\"order\": \"hostname ASC\"}. Valid type values: \
             all, active, ignored, up, down, disabled, os, mac, ipv4, ipv6, location, location_id, \
             hostname, sysName, display, device_id, type, serial, version, hardware, features",
        )],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("device_add", HttpMethod::Post, "devices", DEVICES_ADMIN, true, false),
        "Add a new device.",
        &[ParamSpec::payload(
            "Device fields: hostname (required), display, version (v1, v2c, v3), community, \
             port, transport, poller_group, force_add, snmp_disable, os, hardware, \
             authlevel, authname, authpass, authalgo, cryptopass, cryptoalgo",
        )],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_get", HttpMethod::Get, "devices/{hostname}", DEVICES),
        "Get device details by hostname.",
        &[ParamSpec::path("hostname", ParamKind::String, "Device hostname")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("device_delete", HttpMethod::Delete, "devices/{hostname}", DEVICES_ADMIN, true, true),
        "Delete a device by hostname.",
        &[ParamSpec::path("hostname", ParamKind::String, "Device hostname to delete")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("device_update", HttpMethod::Patch, "devices/{hostname}", DEVICES_ADMIN, true, true),
        "Update device fields.",
        &[
            HOSTNAME,
            ParamSpec::payload(
                "Fields to set, e.g. {\"notes\": \"rack 4\"}: notes, purpose, override_sysLocation, \
                 location_id, ignore, disabled, poller_group",
            ),
        ],
        BodyShape::FieldPatch,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_ports", HttpMethod::Get, "devices/{hostname}/ports", DEVICES),
        "List ports for a device.",
        &[
            HOSTNAME,
            ParamSpec::query(
                "columns",
                "columns",
                ParamKind::String,
                "Comma-separated columns to return, e.g. port_id,ifName,ifAlias,ifOperStatus",
            ),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_ports_get", HttpMethod::Get, "devices/{hostname}/ports/{ifname}", DEVICES),
        "Get port info for a device by interface name.",
        &[HOSTNAME, ParamSpec::path("ifname", ParamKind::String, "Interface name")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_availability", HttpMethod::Get, "devices/{hostname}/availability", DEVICES),
        "Get device availability.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_outages", HttpMethod::Get, "devices/{hostname}/outages", DEVICES),
        "Get device outages.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "device_set_maintenance",
            HttpMethod::Post,
            "devices/{hostname}/maintenance",
            DEVICES_ADMIN,
            false,
            true,
        ),
        "Put a device into maintenance mode.",
        &[HOSTNAME, MAINTENANCE_PAYLOAD],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("device_discover", HttpMethod::Get, "devices/{hostname}/discover", DEVICES_WRITE, false, false),
        "Trigger device rediscovery.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "device_rename",
            HttpMethod::Patch,
            "devices/{hostname}/rename/{new_hostname}",
            DEVICES_WRITE,
            true,
            true,
        ),
        "Rename a device.",
        &[
            ParamSpec::path("hostname", ParamKind::String, "Current device hostname or ID"),
            ParamSpec::path("new_hostname", ParamKind::String, "New hostname for the device"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_maintenance_status", HttpMethod::Get, "devices/{hostname}/maintenance", DEVICES),
        "Check whether a device is in maintenance mode.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_vlans", HttpMethod::Get, "devices/{hostname}/vlans", DEVICES),
        "Get VLANs configured on a device.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("device_links", HttpMethod::Get, "devices/{hostname}/links", DEVICES),
        "Get network links for a device.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "device_eventlog_add",
            HttpMethod::Post,
            "devices/{hostname}/eventlog",
            DEVICES_WRITE,
            false,
            false,
        ),
        "Add a custom event log entry for a device.",
        &[
            HOSTNAME,
            ParamSpec::payload("Event log entry: text (required), type, severity (1-5), datetime"),
        ],
        BodyShape::Payload,
    ),
    // Device groups
    OperationSpec::new(
        OperationDescriptor::read("devicegroups_list", HttpMethod::Get, "devicegroups", GROUPS),
        "List all device groups.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("devicegroup_add", HttpMethod::Post, "devicegroups", GROUPS_ADMIN, true, false),
        "Add a new device group.",
        &[ParamSpec::payload(
            "Group fields: name (required), type (required, static or dynamic), desc, \
             rules (dynamic groups), devices (static groups)",
        )],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("devicegroup_update", HttpMethod::Patch, "devicegroups/{name}", GROUPS_ADMIN, true, true),
        "Update a device group.",
        &[GROUP_NAME, ParamSpec::payload("Fields to change: name, type, desc, rules, devices")],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("devicegroup_delete", HttpMethod::Delete, "devicegroups/{name}", GROUPS_ADMIN, true, true),
        "Delete a device group by name.",
        &[ParamSpec::path("name", ParamKind::String, "Device group name to delete")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("devicegroup_devices", HttpMethod::Get, "devicegroups/{name}", GROUPS),
        "List devices in a device group.",
        &[
            GROUP_NAME,
            ParamSpec::flag("full", "full", "True to return complete device data instead of IDs"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "devicegroup_set_maintenance",
            HttpMethod::Post,
            "devicegroups/{name}/maintenance",
            GROUPS_ADMIN,
            true,
            true,
        ),
        "Put every device in a group into maintenance mode.",
        &[GROUP_NAME, MAINTENANCE_PAYLOAD],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "devicegroup_add_devices",
            HttpMethod::Post,
            "devicegroups/{name}/devices",
            GROUPS_ADMIN,
            true,
            false,
        ),
        "Add devices to a static device group.",
        &[GROUP_NAME, ParamSpec::payload(DEVICE_IDS)],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "devicegroup_remove_devices",
            HttpMethod::Delete,
            "devicegroups/{name}/devices",
            GROUPS_ADMIN,
            true,
            false,
        ),
        "Remove devices from a static device group.",
        &[GROUP_NAME, ParamSpec::payload(DEVICE_IDS)],
        BodyShape::Payload,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn find(name: &str) -> &'static OperationSpec {
        OPERATIONS.iter().find(|s| s.name() == name).unwrap()
    }

    #[test]
    fn test_device_delete_is_destructive() {
        let spec = find("device_delete");
        assert!(spec.descriptor.mutating);
        assert!(spec.descriptor.destructive);
        assert_eq!(spec.descriptor.method, HttpMethod::Delete);
    }

    #[test]
    fn test_discover_is_mutating_get() {
        let spec = find("device_discover");
        assert_eq!(spec.descriptor.method, HttpMethod::Get);
        assert!(spec.descriptor.mutating);
    }

    #[test]
    fn test_remove_devices_sends_body_with_delete() {
        let request = find("devicegroup_remove_devices")
            .build_request(&json!({"name": "edge", "payload": {"devices": [1, 2]}}))
            .unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path().unwrap(), "devicegroups/edge/devices");
        assert_eq!(request.body, Some(json!({"devices": [1, 2]})));
    }

    #[test]
    fn test_rename_encodes_both_segments() {
        let request = find("device_rename")
            .build_request(&json!({"hostname": "old host", "new_hostname": "new/host"}))
            .unwrap();
        assert_eq!(request.path().unwrap(), "devices/old%20host/rename/new%2Fhost");
    }
}
