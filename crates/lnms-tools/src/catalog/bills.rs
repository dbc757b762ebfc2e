//! Billing

use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const BILLS: &[&str] = &["librenms", "bills", "read-only"];
const BILLS_ADMIN: &[&str] = &["librenms", "bills", "admin"];

const BILL_ID: ParamSpec = ParamSpec::path("bill_id", ParamKind::Id, "Bill ID");
const HISTORY_ID: ParamSpec = ParamSpec::path("history_id", ParamKind::Id, "Bill history ID");
const GRAPH_TYPE: ParamSpec =
    ParamSpec::path("graph_type", ParamKind::String, "Graph type: bits, monthly, hour, or day");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("bills_list", HttpMethod::Get, "bills", BILLS),
        "List bills with optional filters.",
        &[
            ParamSpec::query("period", "period", ParamKind::String, "\"previous\" to list previous period bills"),
            ParamSpec::query("ref", "ref", ParamKind::String, "Bill reference filter"),
            ParamSpec::query("custid", "custid", ParamKind::String, "Customer ID filter"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("bill_get", HttpMethod::Get, "bills/{bill_id}", BILLS),
        "Get a bill by ID.",
        &[
            BILL_ID,
            ParamSpec::query("period", "period", ParamKind::String, "\"previous\" for the previous period"),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("bill_graph", HttpMethod::Get, "bills/{bill_id}/graphs/{graph_type}", BILLS),
        "Get a bill graph image.",
        &[BILL_ID, GRAPH_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "bill_graph_data",
            HttpMethod::Get,
            "bills/{bill_id}/graphdata/{graph_type}",
            BILLS,
        ),
        "Get bill graph data.",
        &[BILL_ID, GRAPH_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("bill_history", HttpMethod::Get, "bills/{bill_id}/history", BILLS),
        "Get bill history.",
        &[BILL_ID],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "bill_history_graph",
            HttpMethod::Get,
            "bills/{bill_id}/history/{history_id}/graphs/{graph_type}",
            BILLS,
        ),
        "Get a graph for one bill history period.",
        &[BILL_ID, HISTORY_ID, GRAPH_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "bill_history_graph_data",
            HttpMethod::Get,
            "bills/{bill_id}/history/{history_id}/graphdata/{graph_type}",
            BILLS,
        ),
        "Get graph data for one bill history period.",
        &[BILL_ID, HISTORY_ID, GRAPH_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("bill_create_or_update", HttpMethod::Post, "bills", BILLS_ADMIN, true, false),
        "Create a bill, or update one when the payload carries bill_id.",
        &[ParamSpec::payload(
            "Bill fields: bill_id (updates only), bill_name, ports (array of port IDs), bill_type \
             (cdr or quota), bill_cdr, bill_quota, bill_day, bill_custid, bill_ref, bill_notes",
        )],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("bill_delete", HttpMethod::Delete, "bills/{bill_id}", BILLS_ADMIN, true, true),
        "Delete a bill by ID.",
        &[ParamSpec::path("bill_id", ParamKind::Id, "Bill ID to delete")],
        BodyShape::None,
    ),
];
