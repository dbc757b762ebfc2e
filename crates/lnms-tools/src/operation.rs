//! Operation specs
//!
//! An [`OperationSpec`] is the static, data-only definition of one catalog
//! entry: its descriptor, its parameters and where each parameter goes in
//! the outgoing request. Shaping a call validates the caller's arguments
//! against the parameter list and produces an [`ApiRequest`] without touching the
//! network.

use lnms_client::ApiRequest;
use lnms_core::{Error, OperationDescriptor, Result};
use serde_json::{json, Map, Value};

/// Argument type accepted for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// Integer >= 1
    Id,
    Boolean,
    Object,
    /// Object or array of objects
    Document,
}

impl ParamKind {
    fn json_type(&self) -> Value {
        match self {
            ParamKind::String => json!("string"),
            ParamKind::Integer | ParamKind::Id => json!("integer"),
            ParamKind::Boolean => json!("boolean"),
            ParamKind::Object => json!("object"),
            ParamKind::Document => json!(["object", "array"]),
        }
    }
}

/// Where a parameter ends up in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into the `{name}` placeholder
    Path,
    /// Query parameter under the given wire name
    Query(&'static str),
    /// Object whose entries become query parameters verbatim
    QueryMap,
    /// Sends `wire=1` when the boolean is true, nothing otherwise
    QueryFlag(&'static str),
    /// Field of the JSON body under the given wire name
    Body(&'static str),
    /// The whole JSON body
    Payload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub location: ParamLocation,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn path(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self { name, kind, required: true, location: ParamLocation::Path, description }
    }

    pub const fn query(
        name: &'static str,
        wire: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        Self { name, kind, required: false, location: ParamLocation::Query(wire), description }
    }

    pub const fn query_map(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Object,
            required: false,
            location: ParamLocation::QueryMap,
            description,
        }
    }

    pub const fn flag(name: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Boolean,
            required: false,
            location: ParamLocation::QueryFlag(wire),
            description,
        }
    }

    pub const fn body_field(
        name: &'static str,
        wire: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        Self { name, kind, required: false, location: ParamLocation::Body(wire), description }
    }

    pub const fn payload(description: &'static str) -> Self {
        Self {
            name: "payload",
            kind: ParamKind::Object,
            required: true,
            location: ParamLocation::Payload,
            description,
        }
    }

    /// Payload that may also be an array of records
    pub const fn document(description: &'static str) -> Self {
        Self { kind: ParamKind::Document, ..Self::payload(description) }
    }

    fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.json_type(),
            "description": self.description,
        });
        if self.kind == ParamKind::Id {
            schema["minimum"] = json!(1);
        }
        schema
    }
}

/// How the request body is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    None,
    /// The `payload` argument, verbatim
    Payload,
    /// `Body` parameters collected into one object; omitted when empty
    Fields,
    /// The `payload` object rewritten as `{"field": .., "data": ..}`
    FieldPatch,
}

/// Static definition of one operation
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub descriptor: OperationDescriptor,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub body: BodyShape,
}

impl OperationSpec {
    pub const fn new(
        descriptor: OperationDescriptor,
        description: &'static str,
        params: &'static [ParamSpec],
        body: BodyShape,
    ) -> Self {
        Self { descriptor, description, params, body }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// JSON schema of the accepted arguments
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Validate arguments and shape them into a request.
    pub fn build_request(&self, arguments: &Value) -> Result<ApiRequest> {
        let empty = Map::new();
        let args = match arguments {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => return Err(Error::invalid_params("arguments must be an object")),
        };

        if let Some(unknown) = args.keys().find(|k| !self.params.iter().any(|p| p.name == k.as_str())) {
            return Err(Error::invalid_params(format!(
                "unknown parameter '{}' for {}",
                unknown,
                self.name()
            )));
        }

        let mut request = ApiRequest::new(self.descriptor.method, self.descriptor.path_template);
        let mut fields = Map::new();
        let mut payload: Option<Value> = None;

        for param in self.params {
            let value = match args.get(param.name).filter(|v| !v.is_null()) {
                Some(v) => v,
                None if param.required => {
                    return Err(Error::invalid_params(format!(
                        "missing required parameter '{}'",
                        param.name
                    )))
                }
                None => continue,
            };
            let value = check_kind(param, value)?;

            match param.location {
                ParamLocation::Path => {
                    request.path_params.insert(param.name.to_string(), scalar_string(&value));
                }
                ParamLocation::Query(wire) => {
                    request.query.push((wire.to_string(), Some(scalar_string(&value))));
                }
                ParamLocation::QueryMap => {
                    if let Value::Object(map) = value.as_ref() {
                        for (k, v) in map {
                            let v = if v.is_null() { None } else { Some(scalar_string(v)) };
                            request.query.push((k.clone(), v));
                        }
                    }
                }
                ParamLocation::QueryFlag(wire) => {
                    if value.as_bool() == Some(true) {
                        request.query.push((wire.to_string(), Some("1".to_string())));
                    }
                }
                ParamLocation::Body(wire) => {
                    fields.insert(wire.to_string(), value.into_owned());
                }
                ParamLocation::Payload => {
                    payload = Some(value.into_owned());
                }
            }
        }

        request.body = match self.body {
            BodyShape::None => None,
            BodyShape::Payload => payload,
            BodyShape::Fields if fields.is_empty() => None,
            BodyShape::Fields => Some(Value::Object(fields)),
            BodyShape::FieldPatch => {
                Some(field_patch(payload.as_ref().and_then(Value::as_object).unwrap_or(&empty))?)
            }
        };

        Ok(request)
    }
}

/// Validate one argument against its kind, normalising numeric strings.
fn check_kind<'a>(param: &ParamSpec, value: &'a Value) -> Result<std::borrow::Cow<'a, Value>> {
    use std::borrow::Cow;

    let mismatch = || {
        Error::invalid_params(format!(
            "parameter '{}' must be {}",
            param.name,
            match param.kind {
                ParamKind::String => "a string",
                ParamKind::Integer => "an integer",
                ParamKind::Id => "a positive integer",
                ParamKind::Boolean => "a boolean",
                ParamKind::Object => "an object",
                ParamKind::Document => "an object or an array",
            }
        ))
    };

    match param.kind {
        ParamKind::String => match value {
            Value::String(_) | Value::Number(_) => Ok(Cow::Borrowed(value)),
            _ => Err(mismatch()),
        },
        ParamKind::Integer | ParamKind::Id => {
            let n = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(mismatch)?;
            if param.kind == ParamKind::Id && n < 1 {
                return Err(mismatch());
            }
            Ok(Cow::Owned(json!(n)))
        }
        ParamKind::Boolean if value.is_boolean() => Ok(Cow::Borrowed(value)),
        ParamKind::Object if value.is_object() => Ok(Cow::Borrowed(value)),
        ParamKind::Document if value.is_object() || value.is_array() => Ok(Cow::Borrowed(value)),
        ParamKind::Boolean | ParamKind::Object | ParamKind::Document => Err(mismatch()),
    }
}

/// Render a scalar for a path segment or query string
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `{"a": 1}` becomes `{"field": "a", "data": 1}`; several keys become
/// parallel `field`/`data` arrays.
pub fn field_patch(payload: &Map<String, Value>) -> Result<Value> {
    if payload.is_empty() {
        return Err(Error::invalid_params("payload must contain at least one field"));
    }
    if payload.len() == 1 {
        if let Some((field, data)) = payload.iter().next() {
            return Ok(json!({ "field": field, "data": data }));
        }
    }
    let fields: Vec<&String> = payload.keys().collect();
    let data: Vec<&Value> = payload.values().collect();
    Ok(json!({ "field": fields, "data": data }))
}
