//! Event, syslog, alert and auth logs

use super::HOSTNAME;
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const LOGS: &[&str] = &["librenms", "logs", "read-only", "global-read"];

const START: ParamSpec = ParamSpec::query("start", "start", ParamKind::Integer, "Page number for pagination");
const LIMIT: ParamSpec = ParamSpec::query("limit", "limit", ParamKind::Integer, "Maximum number of results");
const FROM: ParamSpec =
    ParamSpec::query("from_ts", "from", ParamKind::String, "Start timestamp (Unix or datetime string)");
const TO: ParamSpec = ParamSpec::query("to_ts", "to", ParamKind::String, "End timestamp (Unix or datetime string)");
const SORT: ParamSpec = ParamSpec::query("sortorder", "sortorder", ParamKind::String, "Sort order: ASC or DESC");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("logs_eventlog", HttpMethod::Get, "logs/eventlog/{hostname}", LOGS),
        "Get event logs for a device.",
        &[HOSTNAME, START, LIMIT, FROM, TO, SORT],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("logs_syslog", HttpMethod::Get, "logs/syslog/{hostname}", LOGS),
        "Get syslog entries for a device.",
        &[HOSTNAME, START, LIMIT, FROM, TO, SORT],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("logs_alertlog", HttpMethod::Get, "logs/alertlog/{hostname}", LOGS),
        "Get alert logs for a device.",
        &[HOSTNAME, START, LIMIT, FROM, TO, SORT],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("logs_authlog", HttpMethod::Get, "logs/authlog", LOGS),
        "Get authentication logs.",
        &[START, LIMIT, FROM, TO, SORT],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "logs_syslogsink",
            HttpMethod::Post,
            "syslogsink",
            &["librenms", "logs", "admin"],
            false,
            false,
        ),
        "Ingest syslog messages through the API sink.",
        &[ParamSpec::document("A syslog message object, or an array of them")],
        BodyShape::Payload,
    ),
];
