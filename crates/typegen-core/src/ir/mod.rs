pub mod constraints;
pub mod registry;
pub mod types;

pub use constraints::{ArrayBounds, ConstraintDescriptor, NumericBounds, StringBounds};
pub use registry::TypeRegistry;
pub use types::{
    AliasType, ArrayType, Field, Literal, LiteralUnionType, Primitive, RecordType, TypeDef,
    TypeKind, TypeRef, UnionType,
};
