//! Request path rendering
//!
//! Substitutes `{name}` placeholders with percent-encoded values. Each value
//! is encoded as a single segment, so identifiers such as `Gi0/1`,
//! `Rack 4 / Row B` or `a?b#c` cannot change the shape of the path.
//!
//! Values made only of dots are rejected: URL parsing resolves `.` and `..`
//! (and their `%2E` forms) as dot segments, so no encoding survives the trip.

use lnms_core::{Error, Result};
use std::collections::BTreeMap;

/// Render a path template with the given parameters.
///
/// Every placeholder must have a value; extra parameters are ignored.
pub fn render_path(template: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let mut rendered = Vec::new();

    for segment in template.split('/') {
        match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => {
                let value = params.get(name).ok_or_else(|| {
                    Error::invalid_params(format!("missing path parameter '{}'", name))
                })?;
                if value.is_empty() {
                    return Err(Error::invalid_params(format!(
                        "path parameter '{}' must not be empty",
                        name
                    )));
                }
                if value.chars().all(|c| c == '.') {
                    return Err(Error::invalid_params(format!(
                        "path parameter '{}' cannot consist only of dots (got '{}')",
                        name, value
                    )));
                }
                rendered.push(encode_segment(value));
            }
            None => rendered.push(segment.to_string()),
        }
    }

    Ok(rendered.join("/"))
}

/// Percent-encode one path segment (everything outside A-Z a-z 0-9 - _ . ~).
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
