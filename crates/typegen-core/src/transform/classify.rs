use crate::schema::{Schema, SchemaType};

/// The generation strategy for one schema node, decided once and matched
/// exhaustively by every downstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Reference,
    Intersection,
    Union,
    Object,
    Array,
    Enum,
    Primitive,
    FreeForm,
}

/// Decide which strategy applies. The order is load-bearing: `$ref` wins
/// over every sibling keyword, and an intersection outranks a union when a
/// malformed schema carries both.
pub fn classify(schema: &Schema) -> Strategy {
    if schema.reference.is_some() {
        return Strategy::Reference;
    }
    if !schema.all_of.is_empty() {
        return Strategy::Intersection;
    }
    if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
        return Strategy::Union;
    }
    if schema.is_type(SchemaType::Object) || !schema.properties.is_empty() {
        return Strategy::Object;
    }
    if schema.is_type(SchemaType::Array) {
        return Strategy::Array;
    }
    if schema.primitive_type().is_some() {
        if schema.enum_values.is_empty() {
            return Strategy::Primitive;
        }
        return Strategy::Enum;
    }
    Strategy::FreeForm
}
