//! ARP, BGP, OSPF, VRF, VLANs, links and the forwarding database

use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const ROUTING: &[&str] = &["librenms", "routing", "read-only", "global-read"];
const OSPF: &[&str] = &["librenms", "routing", "ospf", "read-only", "global-read"];
const SWITCHING: &[&str] = &["librenms", "switching", "read-only"];

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read(
            "arp_search",
            HttpMethod::Get,
            "resources/ip/arp/{query}",
            &["librenms", "arp", "read-only", "global-read"],
        ),
        "Search ARP entries.",
        &[ParamSpec::path(
            "query",
            ParamKind::String,
            "IP address, MAC address, CIDR network, or \"all\"",
        )],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("bgp_sessions", HttpMethod::Get, "bgp", ROUTING),
        "List BGP sessions with optional filters.",
        &[
            ParamSpec::query("hostname", "hostname", ParamKind::String, "Filter by device hostname"),
            ParamSpec::query("asn", "asn", ParamKind::Integer, "Filter by local ASN"),
            ParamSpec::query("remote_asn", "remote_asn", ParamKind::Integer, "Filter by remote ASN"),
            ParamSpec::query("remote_address", "remote_address", ParamKind::String, "Filter by remote IP address"),
            ParamSpec::query("local_address", "local_address", ParamKind::String, "Filter by local IP address"),
            ParamSpec::query("bgp_descr", "bgp_descr", ParamKind::String, "Filter by description (SQL LIKE)"),
            ParamSpec::query("bgp_state", "bgp_state", ParamKind::String, "Filter by state, e.g. established"),
            ParamSpec::query(
                "bgp_adminstate",
                "bgp_adminstate",
                ParamKind::String,
                "Filter by admin state: start, stop, running",
            ),
            ParamSpec::query("bgp_family", "bgp_family", ParamKind::Integer, "Address family: 4 or 6"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("bgp_session_get", HttpMethod::Get, "bgp/{bgp_id}", ROUTING),
        "Get a BGP session by ID.",
        &[ParamSpec::path("bgp_id", ParamKind::Id, "BGP session ID")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "bgp_session_edit",
            HttpMethod::Post,
            "bgp/{bgp_id}",
            &["librenms", "routing", "admin"],
            true,
            true,
        ),
        "Edit a BGP session by ID.",
        &[
            ParamSpec::path("bgp_id", ParamKind::Id, "BGP session ID"),
            ParamSpec::payload("Fields to change, as {\"bgp_descr\": \"description\"}"),
        ],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::read("routing_ip_addresses", HttpMethod::Get, "resources/ip/addresses", ROUTING),
        "List all IP addresses.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("switching_vlans", HttpMethod::Get, "resources/vlans", SWITCHING),
        "List all VLANs.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("switching_links", HttpMethod::Get, "resources/links", SWITCHING),
        "List all links.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "fdb_lookup",
            HttpMethod::Get,
            "resources/fdb/{mac}",
            &["librenms", "fdb", "read-only"],
        ),
        "Look up a MAC address in the forwarding database.",
        &[ParamSpec::path(
            "mac",
            ParamKind::String,
            "MAC address: aa:bb:cc:dd:ee:ff, aabb.ccdd.eeff or aabbccddeeff",
        )],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ospf_list", HttpMethod::Get, "ospf", OSPF),
        "List all OSPF instances.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ospf_ports", HttpMethod::Get, "ospf_ports", OSPF),
        "List all OSPF ports.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "vrf_list",
            HttpMethod::Get,
            "routing/vrf",
            &["librenms", "routing", "vrf", "read-only"],
        ),
        "List all VRF instances.",
        &[],
        BodyShape::None,
    ),
];
