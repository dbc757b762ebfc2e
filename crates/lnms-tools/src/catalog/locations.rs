//! Locations
//!
//! Lookup uses the singular `location/` endpoint, every write goes through
//! `locations/`.

use super::MAINTENANCE_PAYLOAD;
use crate::operation::{BodyShape, OperationSpec, ParamKind, ParamSpec};
use lnms_core::{HttpMethod, OperationDescriptor};

const LOCATIONS_ADMIN: &[&str] = &["librenms", "locations", "admin"];

const LOCATION: ParamSpec = ParamSpec::path("location", ParamKind::String, "Location identifier or name");

pub const OPERATIONS: &[OperationSpec] = &[
    OperationSpec::new(
        OperationDescriptor::read(
            "locations_list",
            HttpMethod::Get,
            "resources/locations",
            &["librenms", "locations", "read-only", "global-read"],
        ),
        "List locations.",
        &[],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write("location_add", HttpMethod::Post, "locations", LOCATIONS_ADMIN, true, false),
        "Add a new location.",
        &[ParamSpec::payload(
            "Location fields: location (required, name), lat (required), lng (required), fixed_coordinates",
        )],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "location_delete",
            HttpMethod::Delete,
            "locations/{location}",
            LOCATIONS_ADMIN,
            true,
            true,
        ),
        "Delete a location.",
        &[LOCATION],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "location_edit",
            HttpMethod::Patch,
            "locations/{location}",
            LOCATIONS_ADMIN,
            true,
            true,
        ),
        "Edit a location.",
        &[LOCATION, ParamSpec::payload("Fields to change: lat, lng")],
        BodyShape::Payload,
    ),
    OperationSpec::new(
        OperationDescriptor::read(
            "location_get",
            HttpMethod::Get,
            "location/{location}",
            &["librenms", "locations", "admin", "read-only"],
        ),
        "Get a location by identifier.",
        &[LOCATION],
        BodyShape::None,
    ),
    OperationSpec::new(
        OperationDescriptor::write(
            "location_set_maintenance",
            HttpMethod::Post,
            "locations/{location}/maintenance",
            LOCATIONS_ADMIN,
            false,
            true,
        ),
        "Put every device in a location into maintenance mode.",
        &[LOCATION, MAINTENANCE_PAYLOAD],
        BodyShape::Payload,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_name_stays_one_segment() {
        let get = OPERATIONS.iter().find(|s| s.name() == "location_get").unwrap();
        let request = get.build_request(&json!({"location": "Rack 4 / Row B"})).unwrap();
        assert_eq!(request.path().unwrap(), "location/Rack%204%20%2F%20Row%20B");
    }

    #[test]
    fn test_writes_use_plural_endpoint() {
        for spec in OPERATIONS.iter().filter(|s| s.descriptor.mutating && s.name() != "location_add") {
            assert!(spec.descriptor.path_template.starts_with("locations/"), "{}", spec.name());
        }
    }
}
