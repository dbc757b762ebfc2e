//! Operation Registry
//!
//! Name-indexed, read-only after startup. Lookups hand out `&'static`
//! specs, so the registry can be shared freely across concurrent calls.

use crate::operation::OperationSpec;
use lnms_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// What `tools/list` exposes for one operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub annotations: Value,
    pub tags: Vec<String>,
}

impl OperationDefinition {
    fn from_spec(spec: &OperationSpec) -> Self {
        Self {
            name: spec.name().to_string(),
            description: spec.description.to_string(),
            input_schema: spec.input_schema(),
            annotations: spec.descriptor.annotations(),
            tags: spec.descriptor.tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Default)]
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, &'static OperationSpec>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full catalog
    pub fn with_catalog() -> Result<Self> {
        let mut registry = Self::new();
        crate::catalog::load_all(&mut registry)?;
        Ok(registry)
    }

    pub fn register(&mut self, spec: &'static OperationSpec) -> Result<()> {
        if self.operations.insert(spec.name(), spec).is_some() {
            return Err(Error::config(format!("operation '{}' registered twice", spec.name())));
        }
        debug!("Registered operation: {}", spec.name());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&'static OperationSpec> {
        self.operations.get(name).copied()
    }

    /// Definitions in name order; `hide_mutating` leaves out every
    /// operation the read-only gate would reject.
    pub fn list(&self, hide_mutating: bool) -> Vec<OperationDefinition> {
        self.operations
            .values()
            .filter(|spec| !(hide_mutating && spec.descriptor.mutating))
            .map(|spec| OperationDefinition::from_spec(spec))
            .collect()
    }

    /// Case-insensitive match on name, description or tag
    pub fn search(&self, query: &str) -> Vec<OperationDefinition> {
        let query = query.to_lowercase();
        self.operations
            .values()
            .filter(|spec| {
                spec.name().to_lowercase().contains(&query)
                    || spec.description.to_lowercase().contains(&query)
                    || spec.descriptor.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .map(|spec| OperationDefinition::from_spec(spec))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.operations.len()
    }

    /// All distinct tags, sorted
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self
            .operations
            .values()
            .flat_map(|spec| spec.descriptor.tags.iter().copied())
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }
}
