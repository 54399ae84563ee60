use regex::Regex;

use crate::error::Diagnostic;
use crate::ir::{ArrayBounds, ConstraintDescriptor, NumericBounds, StringBounds};
use crate::schema::{Exclusive, Schema, SchemaType};

use super::builder::TypeBuilder;

/// Whether a schema carries validation bounds anywhere in its subtree:
/// directly, on a property of a record, on a branch of a composition, or on
/// the items of an array. References are not chased; a referenced schema
/// carries its own constraints on its own named type.
pub fn has_constraints(schema: &Schema) -> bool {
    if has_direct_bounds(schema) {
        return true;
    }
    schema.properties.values().any(has_constraints)
        || schema.one_of.iter().any(has_constraints)
        || schema.any_of.iter().any(has_constraints)
        || schema.all_of.iter().any(has_constraints)
        || schema.items.as_deref().is_some_and(has_constraints)
}

pub(crate) fn has_direct_bounds(schema: &Schema) -> bool {
    schema.minimum.is_some()
        || schema.maximum.is_some()
        || schema.exclusive_minimum.is_some()
        || schema.exclusive_maximum.is_some()
        || schema.min_length.is_some()
        || schema.max_length.is_some()
        || schema.pattern.is_some()
        || schema.min_items.is_some()
        || schema.max_items.is_some()
}

impl TypeBuilder<'_> {
    /// Extract the constraint descriptor for one schema, or `None` when the
    /// target cannot express it: the global nullable mode is on, the schema
    /// itself is nullable, or the schema is a union.
    pub fn constraints_for(&mut self, schema: &Schema) -> Option<ConstraintDescriptor> {
        if self.ctx.nullable {
            return None;
        }
        if schema.explicit_nullable() == Some(true) {
            return None;
        }
        if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
            return None;
        }
        // Sibling bounds of a `$ref` are ignored.
        if schema.reference.is_some() {
            return None;
        }
        if !has_constraints(schema) {
            return None;
        }

        let descriptor = match schema.primitive_type() {
            Some(SchemaType::Integer) => ConstraintDescriptor::Int(numeric_bounds(schema)),
            Some(SchemaType::Number) => ConstraintDescriptor::Float(numeric_bounds(schema)),
            Some(SchemaType::String) => ConstraintDescriptor::String(self.string_bounds(schema)),
            _ if schema.is_type(SchemaType::Array) => {
                ConstraintDescriptor::Array(ArrayBounds {
                    min_items: schema.min_items,
                    max_items: schema.max_items,
                })
            }
            // Record constraints live on the individual fields.
            _ => return None,
        };

        if descriptor.is_empty() {
            return None;
        }
        Some(descriptor)
    }

    fn string_bounds(&mut self, schema: &Schema) -> StringBounds {
        let mut pattern = schema.pattern.clone();
        if let Some(p) = &pattern
            && !pattern_is_valid(p)
        {
            self.diagnostics.push(Diagnostic::warning(
                None,
                format!("pattern `{p}` is not expressible, constraint dropped"),
            ));
            pattern = None;
        }
        StringBounds {
            min_length: schema.min_length,
            max_length: schema.max_length,
            pattern,
        }
    }
}

/// A `minimum`/`maximum` only survives when no exclusive variant claims the
/// same side; exclusive wins. A draft-4 boolean flag reuses the inclusive
/// value as the exclusive limit.
fn numeric_bounds(schema: &Schema) -> NumericBounds {
    let mut bounds = NumericBounds::default();
    match (schema.minimum, schema.exclusive_minimum) {
        (_, Some(Exclusive::Limit(v))) => bounds.exclusive_minimum = Some(v),
        (Some(m), Some(Exclusive::Flag(true))) => bounds.exclusive_minimum = Some(m),
        (Some(m), _) => bounds.minimum = Some(m),
        (None, _) => {}
    }
    match (schema.maximum, schema.exclusive_maximum) {
        (_, Some(Exclusive::Limit(v))) => bounds.exclusive_maximum = Some(v),
        (Some(m), Some(Exclusive::Flag(true))) => bounds.exclusive_maximum = Some(m),
        (Some(m), _) => bounds.maximum = Some(m),
        (None, _) => {}
    }
    bounds
}

/// A pattern survives only if the generic regex engine accepts it and it
/// stays inside the target dialect (no lookaround, no backreferences).
fn pattern_is_valid(pattern: &str) -> bool {
    if Regex::new(pattern).is_err() {
        return false;
    }
    in_target_dialect(pattern)
}

fn in_target_dialect(pattern: &str) -> bool {
    for marker in ["(?=", "(?!", "(?<=", "(?<!"] {
        if pattern.contains(marker) {
            return false;
        }
    }
    // Backreferences: a backslash followed by a digit.
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(next) = chars.peek()
        {
            if next.is_ascii_digit() {
                return false;
            }
            chars.next();
        }
    }
    true
}
