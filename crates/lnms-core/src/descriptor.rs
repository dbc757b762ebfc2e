//! Operation descriptors
//!
//! Static metadata attached to every exposed operation. Policy code reads
//! only the boolean fields; `tags` exist for discovery and filtering.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// HTTP verb used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a body may accompany this verb
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static descriptor for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    /// Operation name as exposed to callers (e.g. "device_get")
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the API root, with `{param}` placeholders
    pub path_template: &'static str,
    pub tags: &'static [&'static str],
    /// Anything other than a pure read
    pub mutating: bool,
    pub destructive: bool,
    pub idempotent: bool,
}

impl OperationDescriptor {
    /// Pure read: not mutating, not destructive, idempotent
    pub const fn read(
        name: &'static str,
        method: HttpMethod,
        path_template: &'static str,
        tags: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            method,
            path_template,
            tags,
            mutating: false,
            destructive: false,
            idempotent: true,
        }
    }

    /// Mutating operation with explicit destructive/idempotent hints
    pub const fn write(
        name: &'static str,
        method: HttpMethod,
        path_template: &'static str,
        tags: &'static [&'static str],
        destructive: bool,
        idempotent: bool,
    ) -> Self {
        Self {
            name,
            method,
            path_template,
            tags,
            mutating: true,
            destructive,
            idempotent,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }

    /// Placeholder names in the path template, in order of appearance
    pub fn path_placeholders(&self) -> Vec<&'static str> {
        placeholders(self.path_template)
    }

    /// MCP tool annotations
    pub fn annotations(&self) -> Value {
        json!({
            "readOnlyHint": !self.mutating,
            "destructiveHint": self.destructive,
            "idempotentHint": self.idempotent,
        })
    }
}

/// Extract `{name}` placeholders from a path template
pub fn placeholders(template: &'static str) -> Vec<&'static str> {
    template
        .split('/')
        .filter_map(|segment| segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .collect()
}
