use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A schema `type` keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// An exclusive bound is either a draft-4 style flag qualifying the
/// inclusive bound on the same side, or a standalone numeric limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exclusive {
    Flag(bool),
    Limit(f64),
}

/// One node of the input schema graph. Schemas reference each other by name
/// through `$ref`; the engine only ever reads them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    /// Tri-state: explicitly nullable, explicitly not, or silent (the global
    /// nullable mode then decides).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Object properties, insertion order = declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    // Composition
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    // Enum values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    // Numeric bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<Exclusive>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<Exclusive>,

    // String bounds
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // Array bounds
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

impl Schema {
    /// Whether `t` appears in the `type` keyword (single or multi valued).
    pub fn is_type(&self, t: SchemaType) -> bool {
        match &self.schema_type {
            Some(TypeSet::Single(single)) => *single == t,
            Some(TypeSet::Multiple(types)) => types.contains(&t),
            None => false,
        }
    }

    /// The first primitive kind declared by the `type` keyword, if any.
    pub fn primitive_type(&self) -> Option<SchemaType> {
        let is_primitive = |t: &SchemaType| {
            matches!(
                t,
                SchemaType::String | SchemaType::Number | SchemaType::Integer | SchemaType::Boolean
            )
        };
        match &self.schema_type {
            Some(TypeSet::Single(single)) if is_primitive(single) => Some(*single),
            Some(TypeSet::Multiple(types)) => types.iter().find(|t| is_primitive(t)).copied(),
            _ => None,
        }
    }

    /// The schema's own say on nullability: the `nullable` flag if present,
    /// otherwise a `null` entry in a multi-valued `type`. `None` means the
    /// schema is silent and the global mode decides.
    pub fn explicit_nullable(&self) -> Option<bool> {
        if self.nullable.is_some() {
            return self.nullable;
        }
        if let Some(TypeSet::Multiple(types)) = &self.schema_type
            && types.contains(&SchemaType::Null)
        {
            return Some(true);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let yaml = r#"
type: integer
minimum: 0
maximum: 150
exclusiveMinimum: true
"#;
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.minimum, Some(0.0));
        assert_eq!(schema.maximum, Some(150.0));
        assert_eq!(schema.exclusive_minimum, Some(Exclusive::Flag(true)));
    }

    #[test]
    fn test_parse_numeric_exclusive() {
        let yaml = "type: number\nexclusiveMaximum: 9.5\n";
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.exclusive_maximum, Some(Exclusive::Limit(9.5)));
    }

    #[test]
    fn test_null_in_type_set_means_nullable() {
        let yaml = "type: [string, \"null\"]\n";
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.explicit_nullable(), Some(true));
        assert_eq!(schema.primitive_type(), Some(SchemaType::String));
    }

    #[test]
    fn test_nullable_flag_wins_over_silence() {
        let yaml = "type: string\nnullable: false\n";
        let schema: Schema = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(schema.explicit_nullable(), Some(false));
    }
}
