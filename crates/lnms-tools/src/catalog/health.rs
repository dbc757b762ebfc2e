//! Health sensors

use super::HOSTNAME;
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const HEALTH: &[&str] = &["librenms", "health", "read-only"];

const SENSOR_TYPE: ParamSpec =
    ParamSpec::path("type", ParamKind::String, "Sensor type (e.g. temperature, voltage, fanspeed)");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read("health_list", HttpMethod::Get, "devices/{hostname}/health", HEALTH),
        "List available health graphs for a device.",
        &[HOSTNAME],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read("health_by_type", HttpMethod::Get, "devices/{hostname}/health/{type}", HEALTH),
        "Get health data by sensor type for a device.",
        &[HOSTNAME, SENSOR_TYPE],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "health_sensor_get",
            HttpMethod::Get,
            "devices/{hostname}/health/{type}/{sensor_id}",
            HEALTH,
        ),
        "Get one sensor of a device by ID.",
        &[HOSTNAME, SENSOR_TYPE, ParamSpec::path("sensor_id", ParamKind::Id, "Sensor ID")],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "sensors_list",
            HttpMethod::Get,
            "resources/sensors",
            &["librenms", "sensors", "read-only"],
        ),
        "List all sensors across all devices.",
        &[],
        BodyShape::None,
    ),
];
