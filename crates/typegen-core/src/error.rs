use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that stop generation of a single named type. Unrelated types in
/// the same run keep generating; the driver collects these per name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("unresolved schema reference: {0}")]
    UnresolvedReference(String),

    #[error("allOf branch of {0} is not a record or a reference to one")]
    NonRecordIntersection(String),

    #[error("unsupported enum base type for {0}")]
    UnsupportedEnumType(String),

    #[error("maxItems {given} exceeds the supported array length {limit}")]
    ArrayTooLarge { given: u64, limit: u64 },

    #[error("union {0} has no members")]
    EmptyUnion(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable condition recorded during generation. Diagnostics are
/// returned as data; the engine never prints or logs them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub type_name: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(type_name: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            type_name,
            message: message.into(),
        }
    }
}

/// A named type whose generation failed. The rest of the run is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeFailure {
    pub type_name: String,
    pub error: GenerateError,
}
