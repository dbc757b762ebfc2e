//! Ports and port groups

use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const PORTS: &[&str] = &["librenms", "ports", "read-only"];
const PORTS_WRITE: &[&str] = &["librenms", "ports"];
const PORT_GROUPS: &[&str] = &["librenms", "port-groups", "read-only", "global-read"];
const PORT_GROUPS_ADMIN: &[&str] = &["librenms", "port-groups", "admin"];

const PORT_ID: ParamSpec = ParamSpec::path("port_id", ParamKind::Id, "Port ID");
const PORT_GROUP_ID: ParamSpec = ParamSpec::path("port_group_id", ParamKind::Id, "Port group ID");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("ports_list", HttpMethod::Get, "ports", PORTS),
        "List all ports with optional filters.",
        &[ParamSpec::query_map(
            "query",
            "Filters passed as query parameters, e.g. {\"columns\": \"port_id,ifName,ifAlias\"}",
        )],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ports_search", HttpMethod::Get, "ports/search/{search}", PORTS),
        "Search ports by ifAlias, ifDescr and ifName.",
        &[ParamSpec::path("search", ParamKind::String, "Search string")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ports_search_field", HttpMethod::Get, "ports/search/{field}/{search}", PORTS),
        "Search ports by one field.",
        &[
            ParamSpec::path("field", ParamKind::String, "Field to search: ifAlias, ifDescr, ifName, ifType, ..."),
            ParamSpec::path("search", ParamKind::String, "Search term"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ports_search_mac", HttpMethod::Get, "ports/mac/{mac}", PORTS),
        "Search ports by MAC address.",
        &[ParamSpec::path(
            "mac",
            ParamKind::String,
            "MAC address: aa:bb:cc:dd:ee:ff, aa-bb-cc-dd-ee-ff, aabb.ccdd.eeff or aabbccddeeff",
        )],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("port_get", HttpMethod::Get, "ports/{port_id}", PORTS),
        "Get port info by port ID.",
        &[PORT_ID],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("port_ip_info", HttpMethod::Get, "ports/{port_id}/ip", PORTS),
        "Get IP info of a port.",
        &[PORT_ID],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("port_transceiver", HttpMethod::Get, "ports/{port_id}/transceiver", PORTS),
        "Get transceiver info of a port.",
        &[PORT_ID],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("port_description_get", HttpMethod::Get, "ports/{port_id}/description", PORTS),
        "Get the description of a port.",
        &[PORT_ID],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "port_description_update",
            HttpMethod::Patch,
            "ports/{port_id}/description",
            PORTS_WRITE,
            true,
            true,
        ),
        "Update the description of a port.",
        &[PORT_ID, ParamSpec::payload("New description, as {\"description\": \"...\"}")],
        BodyShape::Payload,
    ),
    // Port groups
    OperationSpec::new(
        OperationDescriptor::read("port_groups_list", HttpMethod::Get, "port_groups", PORT_GROUPS),
        "List port groups.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("port_group_add", HttpMethod::Post, "port_groups", PORT_GROUPS_ADMIN, true, false),
        "Add a port group.",
        &[ParamSpec::payload("Port group fields: name (required), desc")],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::read("port_group_list_ports", HttpMethod::Get, "port_groups/{name}", PORT_GROUPS),
        "List ports in a port group.",
        &[ParamSpec::path("name", ParamKind::String, "Port group name")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "port_group_assign",
            HttpMethod::Post,
            "port_groups/{port_group_id}/assign",
            PORT_GROUPS_ADMIN,
            false,
            false,
        ),
        "Assign ports to a port group.",
        &[PORT_GROUP_ID, ParamSpec::payload("Port IDs, as {\"port_ids\": [1, 2, 3]}")],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "port_group_remove",
            HttpMethod::Post,
            "port_groups/{port_group_id}/remove",
            PORT_GROUPS_ADMIN,
            false,
            false,
        ),
        "Remove ports from a port group.",
        &[PORT_GROUP_ID, ParamSpec::payload("Port IDs, as {\"port_ids\": [1, 2, 3]}")],
        BodyShape::Payload,
    ),
];
