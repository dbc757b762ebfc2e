use crate::operation::{BodyShape, OperationSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const SYSTEM: &[&str] = &["librenms", "system", "read-only"];

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("system_info", HttpMethod::Get, "system", SYSTEM),
        "Get LibreNMS system info.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("ping", HttpMethod::Get, "ping", SYSTEM),
        "API health check.",
        &[],
        BodyShape::None,
    ),
];
