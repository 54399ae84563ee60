use log::debug;

use crate::error::{Diagnostic, GenerateError};
use crate::ir::{
    AliasType, ArrayType, Field, Literal, LiteralUnionType, Primitive, RecordType, TypeDef,
    TypeKind, TypeRef, TypeRegistry, UnionType,
};
use crate::schema::{Schema, SchemaStore, SchemaType};

use super::classify::{Strategy, classify};
use super::constraints::has_direct_bounds;
use super::naming;

/// Hard ceiling on declared array lengths; the target's array-length
/// encoding cannot represent more.
pub const MAX_ARRAY_LENGTH: u64 = 2_147_483_637;

/// Immutable per-run inputs shared by every component: the schema
/// collection and the global nullable mode.
#[derive(Debug, Clone, Copy)]
pub struct GenContext<'a> {
    pub store: &'a SchemaStore,
    /// When set, schemas silent on nullability generate nullable types.
    pub nullable: bool,
}

/// The recursive schema-to-type generator. Owns the Type Registry for one
/// run; all state is per-instance, so independent runs can coexist.
pub struct TypeBuilder<'a> {
    pub(crate) ctx: GenContext<'a>,
    pub(crate) registry: TypeRegistry,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> TypeBuilder<'a> {
    pub fn new(ctx: GenContext<'a>) -> Self {
        Self {
            ctx,
            registry: TypeRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (TypeRegistry, Vec<Diagnostic>) {
        (self.registry, self.diagnostics)
    }

    /// Generate the named type for `name`, returning a reference to it. A
    /// name already in the registry is returned as-is, never re-derived.
    pub fn build_named(&mut self, name: &str, schema: &Schema) -> Result<TypeRef, GenerateError> {
        let type_name = naming::type_name(name);
        self.define(&type_name, schema)?;
        Ok(TypeRef::named(type_name))
    }

    /// Reserve `name`, build its definition, and complete the reservation.
    /// The reservation is what lets cyclic references terminate: any back
    /// reference reached while descending finds the name already present.
    pub(crate) fn define(&mut self, name: &str, schema: &Schema) -> Result<(), GenerateError> {
        if self.registry.contains(name) {
            return Ok(());
        }
        self.registry.reserve(name);
        match self.build_definition(name, schema) {
            Ok(def) => {
                self.registry.insert(name, def);
                Ok(())
            }
            Err(e) => {
                self.registry.cancel(name);
                Err(e)
            }
        }
    }

    fn build_definition(&mut self, name: &str, schema: &Schema) -> Result<TypeDef, GenerateError> {
        debug!("building definition for {name}");
        match classify(schema) {
            Strategy::Reference => {
                let target = self.build_reference(schema)?;
                Ok(TypeDef::Alias(AliasType {
                    name: name.to_string(),
                    description: schema.description.clone(),
                    target,
                    constraint: None,
                }))
            }
            Strategy::Primitive => {
                let target = self
                    .primitive_ref(schema)
                    .with_nullable(self.schema_nullable(schema));
                let constraint = self.constraints_for(schema);
                Ok(TypeDef::Alias(AliasType {
                    name: name.to_string(),
                    description: schema.description.clone(),
                    target,
                    constraint,
                }))
            }
            Strategy::Enum => {
                let (literals, saw_null) = enum_members(name, schema)?;
                let nullable = saw_null || self.schema_nullable(schema);
                if literals.is_empty() {
                    // All-null enum falls back to the bare primitive, nullable.
                    let target = self.primitive_ref(schema).with_nullable(true);
                    return Ok(TypeDef::Alias(AliasType {
                        name: name.to_string(),
                        description: schema.description.clone(),
                        target,
                        constraint: None,
                    }));
                }
                Ok(TypeDef::LiteralUnion(LiteralUnionType {
                    name: name.to_string(),
                    description: schema.description.clone(),
                    literals,
                    nullable,
                }))
            }
            Strategy::Array => {
                let ty = self.build_array(schema, name)?;
                let constraint = self.constraints_for(schema);
                match ty.kind {
                    TypeKind::Array { item, dims } => Ok(TypeDef::Array(ArrayType {
                        name: name.to_string(),
                        item: *item,
                        dims,
                        nullable: ty.nullable,
                        constraint,
                    })),
                    kind => Ok(TypeDef::Alias(AliasType {
                        name: name.to_string(),
                        description: schema.description.clone(),
                        target: TypeRef {
                            kind,
                            nullable: ty.nullable,
                        },
                        constraint,
                    })),
                }
            }
            Strategy::Object => Ok(TypeDef::Record(self.build_record(name, schema)?)),
            Strategy::Intersection => Ok(TypeDef::Record(self.build_intersection(name, schema)?)),
            Strategy::Union => {
                let branches = if !schema.one_of.is_empty() {
                    &schema.one_of
                } else {
                    &schema.any_of
                };
                let (mut members, hoisted) = self.union_members(name, branches)?;
                let nullable = hoisted || self.schema_nullable(schema);
                if members.len() == 1 {
                    let target = members.remove(0).with_nullable(nullable);
                    return Ok(TypeDef::Alias(AliasType {
                        name: name.to_string(),
                        description: schema.description.clone(),
                        target,
                        constraint: None,
                    }));
                }
                Ok(TypeDef::Union(UnionType {
                    name: name.to_string(),
                    description: schema.description.clone(),
                    members,
                    nullable,
                }))
            }
            Strategy::FreeForm => Ok(TypeDef::Alias(AliasType {
                name: name.to_string(),
                description: schema.description.clone(),
                target: TypeRef::any().with_nullable(self.schema_nullable(schema)),
                constraint: None,
            })),
        }
    }

    /// Generate the type for a schema in field/item position. `hint` is the
    /// name any promoted type is registered under.
    pub(crate) fn build_type(
        &mut self,
        schema: &Schema,
        hint: &str,
    ) -> Result<TypeRef, GenerateError> {
        match classify(schema) {
            Strategy::Reference => self.build_reference(schema),
            Strategy::Primitive => Ok(self
                .primitive_ref(schema)
                .with_nullable(self.schema_nullable(schema))),
            Strategy::Enum => {
                let (mut literals, saw_null) = enum_members(hint, schema)?;
                let nullable = saw_null || self.schema_nullable(schema);
                let ty = match literals.len() {
                    0 => self.primitive_ref(schema),
                    1 => TypeRef::new(TypeKind::Literal(literals.remove(0))),
                    _ => TypeRef::new(TypeKind::Union(
                        literals
                            .into_iter()
                            .map(|l| TypeRef::new(TypeKind::Literal(l)))
                            .collect(),
                    )),
                };
                Ok(ty.with_nullable(nullable))
            }
            Strategy::Array => self.build_array(schema, hint),
            Strategy::Object | Strategy::Intersection => {
                let type_name = naming::type_name(hint);
                self.define(&type_name, schema)?;
                Ok(TypeRef::named(type_name).with_nullable(self.schema_nullable(schema)))
            }
            Strategy::Union => {
                let branches = if !schema.one_of.is_empty() {
                    &schema.one_of
                } else {
                    &schema.any_of
                };
                let (mut members, hoisted) = self.union_members(hint, branches)?;
                let nullable = hoisted || self.schema_nullable(schema);
                if members.len() == 1 {
                    return Ok(members.remove(0).with_nullable(nullable));
                }
                Ok(TypeRef::new(TypeKind::Union(members)).with_nullable(nullable))
            }
            Strategy::FreeForm => Ok(TypeRef::any().with_nullable(self.schema_nullable(schema))),
        }
    }

    /// Resolve a `$ref`, generating the referenced named type first if it is
    /// not already in the registry. Sibling keywords of the `$ref` are
    /// ignored, so only the global mode decides nullability here.
    fn build_reference(&mut self, schema: &Schema) -> Result<TypeRef, GenerateError> {
        let Some(raw) = schema.reference.as_deref() else {
            return Ok(TypeRef::any());
        };
        let key = raw.rsplit('/').next().unwrap_or(raw);
        let type_name = naming::type_name(key);
        if !self.registry.contains(&type_name) {
            let store = self.ctx.store;
            let Some(target) = store.resolve(key) else {
                return Err(GenerateError::UnresolvedReference(key.to_string()));
            };
            self.build_named(key, target)?;
        }
        Ok(TypeRef::named(type_name).with_nullable(self.resolve_nullable(None)))
    }

    pub(crate) fn build_record(
        &mut self,
        name: &str,
        schema: &Schema,
    ) -> Result<RecordType, GenerateError> {
        let mut fields: Vec<Field> = Vec::new();
        for (prop_name, prop) in &schema.properties {
            let field_name = naming::field_name(prop_name);
            if fields.iter().any(|f| f.name == field_name) {
                self.diagnostics.push(Diagnostic::warning(
                    Some(name.to_string()),
                    format!("duplicate field name `{field_name}` after sanitization, keeping the first"),
                ));
                continue;
            }
            let hint = format!("{}{}", name, naming::type_name(prop_name));
            let ty = self.build_type(prop, &hint)?;
            let description = prop
                .description
                .clone()
                .or_else(|| self.referenced_description(prop));
            let constraint = self.constraints_for(prop);
            fields.push(Field {
                name: field_name,
                original_name: prop_name.clone(),
                ty,
                optional: !schema.required.contains(prop_name),
                description,
                constraint,
            });
        }
        Ok(RecordType {
            name: name.to_string(),
            description: schema.description.clone(),
            fields,
            includes: Vec::new(),
        })
    }

    /// Merge allOf branches into a single record. Reference branches become
    /// structural inclusions; inline object branches merge field-wise with
    /// later branches overriding earlier ones.
    fn build_intersection(
        &mut self,
        name: &str,
        schema: &Schema,
    ) -> Result<RecordType, GenerateError> {
        let mut record = RecordType {
            name: name.to_string(),
            description: schema.description.clone(),
            fields: Vec::new(),
            includes: Vec::new(),
        };
        for branch in &schema.all_of {
            match classify(branch) {
                Strategy::Reference => {
                    let ty = self.build_reference(branch)?;
                    let TypeKind::Named(included) = ty.kind else {
                        continue;
                    };
                    match self.registry.get(&included) {
                        Some(TypeDef::Record(_)) | Some(TypeDef::Pending) => {}
                        _ => return Err(GenerateError::NonRecordIntersection(name.to_string())),
                    }
                    self.registry.require_import(included.clone());
                    if !record.includes.contains(&included) {
                        record.includes.push(included);
                    }
                }
                Strategy::Object => {
                    let merged = self.build_record(name, branch)?;
                    merge_fields(&mut record.fields, merged.fields);
                    if record.description.is_none() {
                        record.description = merged.description;
                    }
                }
                Strategy::FreeForm => {
                    // Annotation-only branch; contributes documentation, no shape.
                    if record.description.is_none() {
                        record.description = branch.description.clone();
                    }
                }
                _ => return Err(GenerateError::NonRecordIntersection(name.to_string())),
            }
        }
        // Sibling properties on the composing schema itself merge last.
        if !schema.properties.is_empty() {
            let own = self.build_record(name, schema)?;
            merge_fields(&mut record.fields, own.fields);
        }
        Ok(record)
    }

    /// Generate every member sharing the registry, then hoist nullability:
    /// if any member is nullable, strip the marker from all of them and
    /// report a single marker for the union as a whole.
    fn union_members(
        &mut self,
        hint: &str,
        branches: &[Schema],
    ) -> Result<(Vec<TypeRef>, bool), GenerateError> {
        if branches.is_empty() {
            return Err(GenerateError::EmptyUnion(naming::type_name(hint)));
        }
        let mut members = Vec::new();
        let mut nullable = false;
        for (i, branch) in branches.iter().enumerate() {
            let member_hint = format!("{}Member{}", naming::type_name(hint), i + 1);
            let ty = self.build_type(branch, &member_hint)?;
            if ty.nullable {
                nullable = true;
            }
            match ty.kind {
                TypeKind::Union(inner) => members.extend(inner),
                kind => members.push(TypeRef::new(kind)),
            }
        }
        Ok((members, nullable))
    }

    pub(crate) fn build_array(
        &mut self,
        schema: &Schema,
        hint: &str,
    ) -> Result<TypeRef, GenerateError> {
        if let Some(given) = schema.max_items
            && given > MAX_ARRAY_LENGTH
        {
            return Err(GenerateError::ArrayTooLarge {
                given,
                limit: MAX_ARRAY_LENGTH,
            });
        }
        let item_ref = match schema.items.as_deref() {
            None => TypeRef::any(),
            Some(item) if has_direct_bounds(item) && classify(item) != Strategy::Reference => {
                // Promote the constrained item into its own named type so
                // the bounds have somewhere to attach.
                let promoted = promoted_item_name(hint, item);
                self.define(&promoted, item)?;
                if let Some(constraint) = self.constraints_for(item)
                    && let Some(def) = self.registry.get_mut(&promoted)
                {
                    attach_constraint(def, constraint);
                }
                TypeRef::named(promoted).with_nullable(self.schema_nullable(item))
            }
            Some(item) => {
                let item_hint = format!("{}Item", naming::type_name(hint));
                self.build_type(item, &item_hint)?
            }
        };
        // Collapse directly nested arrays into one dimension count. A
        // nullable inner array keeps its wrapper; the marker would be lost
        // otherwise.
        let ty = match item_ref {
            TypeRef {
                kind: TypeKind::Array { item, dims },
                nullable: false,
            } => TypeRef::new(TypeKind::Array {
                item,
                dims: dims + 1,
            }),
            other => TypeRef::new(TypeKind::Array {
                item: Box::new(other),
                dims: 1,
            }),
        };
        Ok(ty.with_nullable(self.schema_nullable(schema)))
    }

    fn primitive_ref(&self, schema: &Schema) -> TypeRef {
        match schema.primitive_type() {
            Some(kind) => TypeRef::primitive(primitive_of(kind)),
            None => TypeRef::any(),
        }
    }

    fn referenced_description(&self, schema: &Schema) -> Option<String> {
        let raw = schema.reference.as_deref()?;
        let key = raw.rsplit('/').next().unwrap_or(raw);
        self.ctx.store.resolve(key)?.description.clone()
    }

    /// The six-case nullability table: an explicit schema-level answer wins;
    /// the global mode is only consulted when the schema is silent.
    pub(crate) fn resolve_nullable(&self, explicit: Option<bool>) -> bool {
        explicit.unwrap_or(self.ctx.nullable)
    }

    pub(crate) fn schema_nullable(&self, schema: &Schema) -> bool {
        self.resolve_nullable(schema.explicit_nullable())
    }
}

fn primitive_of(kind: SchemaType) -> Primitive {
    match kind {
        SchemaType::Integer => Primitive::Integer,
        SchemaType::Number => Primitive::Number,
        SchemaType::Boolean => Primitive::Boolean,
        _ => Primitive::String,
    }
}

fn enum_members(name: &str, schema: &Schema) -> Result<(Vec<Literal>, bool), GenerateError> {
    let type_name = naming::type_name(name);
    let Some(base) = schema.primitive_type() else {
        return Err(GenerateError::UnsupportedEnumType(type_name));
    };
    let mut literals = Vec::new();
    let mut saw_null = false;
    for value in &schema.enum_values {
        match (base, value) {
            (_, serde_json::Value::Null) => saw_null = true,
            (SchemaType::String, serde_json::Value::String(s)) => {
                literals.push(Literal::Str(s.clone()));
            }
            (SchemaType::Integer, serde_json::Value::Number(n)) => match n.as_i64() {
                Some(v) => literals.push(Literal::Int(v)),
                None => return Err(GenerateError::UnsupportedEnumType(type_name)),
            },
            (SchemaType::Number, serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => literals.push(Literal::Float(v)),
                None => return Err(GenerateError::UnsupportedEnumType(type_name)),
            },
            (SchemaType::Boolean, serde_json::Value::Bool(b)) => literals.push(Literal::Bool(*b)),
            _ => return Err(GenerateError::UnsupportedEnumType(type_name)),
        }
    }
    Ok((literals, saw_null))
}

/// Name for a promoted array-item type: `<parent-and-field>Items<itemKind>`.
fn promoted_item_name(hint: &str, item: &Schema) -> String {
    let label = match item.primitive_type() {
        Some(kind) => primitive_of(kind).label(),
        None if item.is_type(SchemaType::Array) => "Array",
        None => "Record",
    };
    format!("{}Items{}", naming::type_name(hint), label)
}

fn attach_constraint(def: &mut TypeDef, constraint: crate::ir::ConstraintDescriptor) {
    match def {
        TypeDef::Alias(alias) => alias.constraint = Some(constraint),
        TypeDef::Array(array) => array.constraint = Some(constraint),
        _ => {}
    }
}

/// Merge `from` into `into`, overriding same-named fields.
fn merge_fields(into: &mut Vec<Field>, from: Vec<Field>) {
    for field in from {
        if let Some(existing) = into.iter_mut().find(|e| e.name == field.name) {
            *existing = field;
        } else {
            into.push(field);
        }
    }
}
