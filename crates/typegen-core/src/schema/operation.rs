use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::model::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// The implicit success status for the method. A response on this code
    /// is returned as the bare body type, without a wrapper record.
    pub fn default_status(self) -> u16 {
        match self {
            HttpMethod::Post => 201,
            _ => 200,
        }
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// One operation-level parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// A response header's schema plus its required flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderSpec {
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Schema,
}

/// One response of an operation: status code, optional body schema, and a
/// header-name to schema map. Transient input to the response modeler.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    pub status: u16,
    pub body: Option<Schema>,
    pub headers: IndexMap<String, HeaderSpec>,
}

impl ResponseSpec {
    pub fn new(status: u16, body: Option<Schema>) -> Self {
        Self {
            status,
            body,
            headers: IndexMap::new(),
        }
    }
}

/// Collect the header parameters of an operation into the header map the
/// response modeler consumes.
pub fn headers_from_parameters(params: &[Parameter]) -> IndexMap<String, HeaderSpec> {
    params
        .iter()
        .filter(|p| p.location == ParameterLocation::Header)
        .map(|p| {
            let spec = HeaderSpec {
                required: p.required,
                schema: p.schema.clone().unwrap_or_default(),
            };
            (p.name.clone(), spec)
        })
        .collect()
}

/// Cache-control directive configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheControl {
    pub must_revalidate: bool,
    pub no_cache: bool,
    pub no_cache_fields: Vec<String>,
    pub no_store: bool,
    pub no_transform: bool,
    pub private: bool,
    pub private_fields: Vec<String>,
    pub proxy_revalidate: bool,
    pub max_age: Option<i64>,
    pub s_max_age: Option<i64>,
}
