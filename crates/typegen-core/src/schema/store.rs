use indexmap::IndexMap;
use serde::Deserialize;

use super::model::Schema;
use crate::error::ParseError;

/// A named schema collection for one generation run. Insertion order is the
/// order types are generated in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SchemaStore {
    schemas: IndexMap<String, Schema>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Look up the schema registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.schemas.iter()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Parse a named schema collection from YAML.
pub fn from_yaml(input: &str) -> Result<SchemaStore, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a named schema collection from JSON.
pub fn from_json(input: &str) -> Result<SchemaStore, ParseError> {
    Ok(serde_json::from_str(input)?)
}
