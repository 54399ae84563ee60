use super::constraints::ConstraintDescriptor;

/// A target primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Integer,
    Number,
    String,
    Boolean,
}

impl Primitive {
    /// PascalCase label used when synthesizing type names.
    pub fn label(self) -> &'static str {
        match self {
            Primitive::Integer => "Integer",
            Primitive::Number => "Number",
            Primitive::String => "String",
            Primitive::Boolean => "Boolean",
        }
    }
}

/// A literal member of an enumerated type. Quoted for strings, bare for
/// numeric and boolean members.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A reference to a type, inline or by name, with a single nullable marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub kind: TypeKind,
    pub nullable: bool,
}

/// The shape of a referenced type. The item of an `Array` kind is never
/// itself a non-nullable `Array`; dimensions accumulate in `dims` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(Primitive),
    Literal(Literal),
    Named(String),
    Array { item: Box<TypeRef>, dims: u32 },
    Union(Vec<TypeRef>),
    Any,
}

impl TypeRef {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn primitive(p: Primitive) -> Self {
        Self::new(TypeKind::Primitive(p))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Named(name.into()))
    }

    pub fn any() -> Self {
        Self::new(TypeKind::Any)
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// PascalCase label for synthesized composite names (response wrappers,
    /// promoted item types).
    pub fn label(&self) -> String {
        match &self.kind {
            TypeKind::Primitive(p) => p.label().to_string(),
            TypeKind::Literal(_) => "Literal".to_string(),
            TypeKind::Named(name) => name.clone(),
            TypeKind::Array { item, .. } => format!("{}Array", item.label()),
            TypeKind::Union(_) => "Union".to_string(),
            TypeKind::Any => "Any".to_string(),
        }
    }
}

/// A field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub original_name: String,
    pub ty: TypeRef,
    pub optional: bool,
    pub description: Option<String>,
    pub constraint: Option<ConstraintDescriptor>,
}

/// One Named Type Definition held by the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Record(RecordType),
    Union(UnionType),
    Array(ArrayType),
    Alias(AliasType),
    LiteralUnion(LiteralUnionType),
    /// Forward declaration registered before descending into a definition,
    /// so cyclic references resolve to the type that will exist.
    Pending,
}

impl TypeDef {
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeDef::Record(r) => Some(&r.name),
            TypeDef::Union(u) => Some(&u.name),
            TypeDef::Array(a) => Some(&a.name),
            TypeDef::Alias(a) => Some(&a.name),
            TypeDef::LiteralUnion(l) => Some(&l.name),
            TypeDef::Pending => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    /// Names of types this record structurally includes (all their fields
    /// are part of this record).
    pub includes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<TypeRef>,
    /// Single hoisted marker; members themselves are never nullable.
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub name: String,
    pub item: TypeRef,
    pub dims: u32,
    pub nullable: bool,
    pub constraint: Option<ConstraintDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasType {
    pub name: String,
    pub description: Option<String>,
    pub target: TypeRef,
    pub constraint: Option<ConstraintDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralUnionType {
    pub name: String,
    pub description: Option<String>,
    pub literals: Vec<Literal>,
    pub nullable: bool,
}
