use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

pub const OPERATIONS: &[OperationSpec] = &[OperationSpec::new(
    OperationDescriptor::read(
        "poller_group_get",
        HttpMethod::Get,
        "poller_group/{poller_group}",
        &["librenms", "poller-groups", "admin", "read-only"],
    ),
    "Get a poller group, or all of them with \"all\".",
    &[ParamSpec::path("poller_group", ParamKind::String, "Poller group identifier or 'all'")],
    BodyShape::None,
)];
