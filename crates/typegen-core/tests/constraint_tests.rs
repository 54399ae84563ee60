use typegen_core::error::Severity;
use typegen_core::ir::{ArrayBounds, ConstraintDescriptor, NumericBounds, StringBounds, TypeDef};
use typegen_core::schema::{self, SchemaStore};
use typegen_core::transform::{self, GenerationOutcome};
use typegen_core::GeneratorOptions;

fn store(yaml: &str) -> SchemaStore {
    schema::from_yaml(yaml).unwrap()
}

fn generate(yaml: &str) -> GenerationOutcome {
    transform::generate(&store(yaml), &GeneratorOptions::default())
}

fn field_constraint(outcome: &GenerationOutcome, record: &str, field: &str) -> Option<ConstraintDescriptor> {
    let Some(TypeDef::Record(record)) = outcome.registry.get(record) else {
        panic!("{record} should be a record");
    };
    record
        .fields
        .iter()
        .find(|f| f.name == field)
        .unwrap()
        .constraint
        .clone()
}

#[test]
fn integer_field_carries_numeric_bounds() {
    let outcome = generate(
        r#"
Person:
  type: object
  properties:
    age:
      type: integer
      minimum: 0
      maximum: 150
  required: [age]
"#,
    );
    assert_eq!(
        field_constraint(&outcome, "Person", "age"),
        Some(ConstraintDescriptor::Int(NumericBounds {
            minimum: Some(0.0),
            maximum: Some(150.0),
            ..NumericBounds::default()
        }))
    );
}

#[test]
fn exclusive_bounds_win_over_inclusive() {
    let outcome = generate(
        r#"
Reading:
  type: object
  properties:
    temp:
      type: number
      minimum: 0
      exclusiveMinimum: true
      maximum: 100
      exclusiveMaximum: 99.5
"#,
    );
    assert_eq!(
        field_constraint(&outcome, "Reading", "temp"),
        Some(ConstraintDescriptor::Float(NumericBounds {
            minimum: None,
            maximum: None,
            exclusive_minimum: Some(0.0),
            exclusive_maximum: Some(99.5),
        }))
    );
}

#[test]
fn string_bounds_keep_valid_pattern() {
    let outcome = generate(
        r#"
User:
  type: object
  properties:
    handle:
      type: string
      minLength: 3
      maxLength: 32
      pattern: '^[a-z]+$'
"#,
    );
    assert_eq!(
        field_constraint(&outcome, "User", "handle"),
        Some(ConstraintDescriptor::String(StringBounds {
            min_length: Some(3),
            max_length: Some(32),
            pattern: Some("^[a-z]+$".to_string()),
        }))
    );
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn lookahead_pattern_is_dropped_with_a_warning() {
    let outcome = generate(
        r#"
User:
  type: object
  properties:
    password:
      type: string
      minLength: 8
      pattern: '(?=.*[A-Z]).*'
"#,
    );
    // The other bounds survive; only the pattern goes.
    assert_eq!(
        field_constraint(&outcome, "User", "password"),
        Some(ConstraintDescriptor::String(StringBounds {
            min_length: Some(8),
            max_length: None,
            pattern: None,
        }))
    );
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn unparsable_pattern_alone_yields_no_descriptor() {
    let outcome = generate(
        r#"
User:
  type: object
  properties:
    code:
      type: string
      pattern: '[unclosed'
"#,
    );
    assert_eq!(field_constraint(&outcome, "User", "code"), None);
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn global_nullable_mode_suppresses_constraints() {
    let outcome = transform::generate(
        &store(
            r#"
Person:
  type: object
  properties:
    age:
      type: integer
      minimum: 0
"#,
        ),
        &GeneratorOptions { nullable: true },
    );
    assert_eq!(field_constraint(&outcome, "Person", "age"), None);
}

#[test]
fn explicitly_nullable_field_carries_no_constraint() {
    let outcome = generate(
        r#"
Person:
  type: object
  properties:
    age:
      type: integer
      nullable: true
      minimum: 0
"#,
    );
    assert_eq!(field_constraint(&outcome, "Person", "age"), None);
}

#[test]
fn union_field_carries_no_constraint() {
    let outcome = generate(
        r#"
Holder:
  type: object
  properties:
    value:
      minimum: 0
      oneOf:
        - type: integer
        - type: string
"#,
    );
    assert_eq!(field_constraint(&outcome, "Holder", "value"), None);
}

#[test]
fn array_field_carries_item_count_bounds() {
    let outcome = generate(
        r#"
Person:
  type: object
  properties:
    nicknames:
      type: array
      minItems: 1
      maxItems: 5
      items:
        type: string
"#,
    );
    assert_eq!(
        field_constraint(&outcome, "Person", "nicknames"),
        Some(ConstraintDescriptor::Array(ArrayBounds {
            min_items: Some(1),
            max_items: Some(5),
        }))
    );
}

#[test]
fn constrained_array_items_are_promoted_to_named_types() {
    let outcome = generate(
        r#"
Person:
  type: object
  properties:
    hobbies:
      type: array
      items:
        type: string
        maxLength: 20
"#,
    );
    let Some(TypeDef::Alias(promoted)) = outcome.registry.get("PersonHobbiesItemsString") else {
        panic!("the constrained item should be promoted to a named alias");
    };
    assert_eq!(
        promoted.constraint,
        Some(ConstraintDescriptor::String(StringBounds {
            min_length: None,
            max_length: Some(20),
            pattern: None,
        }))
    );
    let Some(TypeDef::Record(person)) = outcome.registry.get("Person") else {
        panic!("Person should be a record");
    };
    let hobbies = person.fields.iter().find(|f| f.name == "hobbies").unwrap();
    assert_eq!(
        hobbies.ty.label(),
        "PersonHobbiesItemsStringArray".to_string()
    );
}

#[test]
fn constraint_detection_looks_through_nesting() {
    let with_nested = serde_yaml_ng::from_str(
        r#"
type: object
properties:
  inner:
    type: object
    properties:
      value:
        type: integer
        minimum: 1
"#,
    )
    .unwrap();
    assert!(transform::has_constraints(&with_nested));

    let without = serde_yaml_ng::from_str("type: object\nproperties:\n  value: {type: integer}\n")
        .unwrap();
    assert!(!transform::has_constraints(&without));
}
