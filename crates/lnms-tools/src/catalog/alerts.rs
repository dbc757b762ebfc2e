//! Alerts, alert rules and alert templates

use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const ALERT: &[&str] = &["librenms", "alert", "read-only", "global-read"];
const ALERT_ADMIN: &[&str] = &["librenms", "alert", "admin"];
const RULES: &[&str] = &["librenms", "alert-rules", "read-only", "global-read"];
const RULES_ADMIN: &[&str] = &["librenms", "alert-rules", "admin"];
const TEMPLATES: &[&str] = &["librenms", "alert-templates", "read-only"];
const TEMPLATES_WRITE: &[&str] = &["librenms", "alert-templates"];

const RULE_FIELDS: &str = "name, builder (rule builder JSON), devices (array of device IDs or [-1] \
     for all), severity (ok, warning, critical), count, delay, interval, mute, invert, notes, disabled";

const TEMPLATE_FIELDS: &str = "name, template (Laravel Blade body), title, title_rec, \
     rules (array of alert rule IDs)";

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("alerts_get", HttpMethod::Get, "alerts", ALERT),
        "Get alerts with optional filters.",
        &[
            ParamSpec::query(
                "state",
                "state",
                ParamKind::Integer,
                "Filter by state: 0 = ok, 1 = alert, 2 = ack",
            ),
            ParamSpec::query(
                "severity",
                "severity",
                ParamKind::String,
                "Filter by severity: ok, warning, critical",
            ),
            ParamSpec::query("alert_rule", "alert_rule", ParamKind::Integer, "Filter by alert rule ID"),
            ParamSpec::query(
                "order",
                "order",
                ParamKind::String,
                "Ordering, default timestamp descending; append ASC or DESC",
            ),
        ],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("alert_get_by_id", HttpMethod::Get, "alerts/{alert_id}", ALERT),
        "Get a specific alert by ID.",
        &[ParamSpec::path("alert_id", ParamKind::Id, "The ID of the alert to retrieve")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_acknowledge",
            HttpMethod::Put,
            "alerts/{alert_id}",
            ALERT_ADMIN,
            false,
            true,
        ),
        "Acknowledge an alert by ID.",
        &[
            ParamSpec::path("alert_id", ParamKind::Id, "Alert ID to acknowledge"),
            ParamSpec::body_field(
                "note",
                "note",
                ParamKind::String,
                "Note to attach to the acknowledgement",
            ),
            ParamSpec::body_field(
                "until_clear",
                "until_clear",
                ParamKind::Boolean,
                "Acknowledge until the alert clears instead of only this instance",
            ),
        ],
        BodyShape::Fields,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_unmute",
            HttpMethod::Put,
            "alerts/unmute/{alert_id}",
            ALERT_ADMIN,
            false,
            true,
        ),
        "Unmute an alert by ID.",
        &[ParamSpec::path("alert_id", ParamKind::Id, "Alert ID to unmute")],
        BodyShape::None,
    ),
    // Alert rules
    OperationSpec::new(
        OperationDescriptor::read("alert_rules_list", HttpMethod::Get, "rules", RULES),
        "List all alert rules.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("alert_rule_get", HttpMethod::Get, "rules/{rule_id}", RULES),
        "Get an alert rule by ID.",
        &[ParamSpec::path("rule_id", ParamKind::Id, "Alert rule ID")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("alert_rule_add", HttpMethod::Post, "rules", RULES_ADMIN, true, false),
        "Add a new alert rule.",
        &[ParamSpec::payload(RULE_FIELDS)],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write("alert_rule_edit", HttpMethod::Put, "rules", RULES_ADMIN, true, true),
        "Edit an existing alert rule; the payload must include rule_id.",
        &[ParamSpec::payload(RULE_FIELDS)],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_rule_delete",
            HttpMethod::Delete,
            "rules/{rule_id}",
            RULES_ADMIN,
            true,
            true,
        ),
        "Delete an alert rule by ID.",
        &[ParamSpec::path("rule_id", ParamKind::Id, "Alert rule ID to delete")],
        BodyShape::None,
    ),
    // Alert templates
    OperationSpec::new(
        OperationDescriptor::read("alert_templates_list", HttpMethod::Get, "templates", TEMPLATES),
        "List all alert templates.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "alert_template_get",
            HttpMethod::Get,
            "templates/{template_id}",
            TEMPLATES,
        ),
        "Get an alert template by ID.",
        &[ParamSpec::path("template_id", ParamKind::Id, "Alert template ID")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_template_create",
            HttpMethod::Post,
            "templates",
            TEMPLATES_WRITE,
            false,
            false,
        ),
        "Create a new alert template.",
        &[ParamSpec::payload(TEMPLATE_FIELDS)],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_template_edit",
            HttpMethod::Put,
            "templates",
            TEMPLATES_WRITE,
            true,
            true,
        ),
        "Edit an existing alert template; the payload must include id.",
        &[ParamSpec::payload(TEMPLATE_FIELDS)],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "alert_template_delete",
            HttpMethod::Delete,
            "templates/{template_id}",
            TEMPLATES_WRITE,
            true,
            true,
        ),
        "Delete an alert template by ID.",
        &[ParamSpec::path("template_id", ParamKind::Id, "Alert template ID to delete")],
        BodyShape::None,
    ),
];
