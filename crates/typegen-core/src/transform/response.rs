use indexmap::IndexMap;

use crate::error::GenerateError;
use crate::ir::{Field, RecordType, TypeDef, TypeKind, TypeRef};
use crate::schema::{CacheControl, HeaderSpec, HttpMethod, ResponseSpec, Schema, SchemaType, TypeSet};

use super::builder::TypeBuilder;
use super::naming;

const STATUS_CODE_MAP: &[(u16, &str)] = &[
    (100, "Continue"),
    (200, "Ok"),
    (201, "Created"),
    (202, "Accepted"),
    (204, "NoContent"),
    (301, "MovedPermanently"),
    (302, "Found"),
    (304, "NotModified"),
    (400, "BadRequest"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "NotFound"),
    (405, "MethodNotAllowed"),
    (406, "NotAcceptable"),
    (408, "RequestTimeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (412, "PreconditionFailed"),
    (413, "PayloadTooLarge"),
    (415, "UnsupportedMediaType"),
    (422, "UnprocessableEntity"),
    (429, "TooManyRequests"),
    (500, "InternalServerError"),
    (501, "NotImplemented"),
    (502, "BadGateway"),
    (503, "ServiceUnavailable"),
    (504, "GatewayTimeout"),
];

/// The PascalCase status-class marker name for a status code.
pub fn status_class(code: u16) -> String {
    if let Some((_, name)) = STATUS_CODE_MAP.iter().find(|(c, _)| *c == code) {
        return (*name).to_string();
    }
    format!("Status{code}")
}

/// A generated header record plus whether the headers parameter as a whole
/// can default to an empty map.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadersRecord {
    pub type_ref: TypeRef,
    pub defaultable: bool,
}

impl TypeBuilder<'_> {
    /// Map one operation's responses to a single return type. Each status
    /// code is mapped independently, then the results are unioned with the
    /// same nullable hoisting as any other union.
    pub fn response_type(
        &mut self,
        method: HttpMethod,
        responses: &[ResponseSpec],
    ) -> Result<TypeRef, GenerateError> {
        let mut members = Vec::new();
        let mut nullable = false;
        for response in responses {
            let ty = self.single_response_type(method, response)?;
            if ty.nullable {
                nullable = true;
            }
            match ty.kind {
                TypeKind::Union(inner) => members.extend(inner),
                kind => members.push(TypeRef::new(kind)),
            }
        }
        if members.is_empty() {
            return Ok(TypeRef::any());
        }
        if members.len() == 1 {
            return Ok(members.remove(0).with_nullable(nullable));
        }
        Ok(TypeRef::new(TypeKind::Union(members)).with_nullable(nullable))
    }

    fn single_response_type(
        &mut self,
        method: HttpMethod,
        response: &ResponseSpec,
    ) -> Result<TypeRef, GenerateError> {
        let class = status_class(response.status);
        let headers = if response.headers.is_empty() {
            None
        } else {
            let headers_name = format!("{class}Headers");
            Some(self.headers_type(&headers_name, &response.headers)?)
        };
        let body = match &response.body {
            Some(schema) => Some(self.build_type(schema, &format!("{class}Body"))?),
            None => None,
        };

        let is_default_code = response.status == method.default_status();
        match body {
            // The method's implicit success code needs no wrapper.
            Some(body) if is_default_code => Ok(body),
            None => {
                // Bodyless responses reduce to the status-class marker.
                self.registry.require_import(class.clone());
                Ok(TypeRef::named(class))
            }
            Some(body) => {
                let wrapper = format!("{}{}", class, body.label());
                if !self.registry.contains(&wrapper) {
                    self.registry.reserve(&wrapper);
                    let mut fields = vec![Field {
                        name: "body".to_string(),
                        original_name: "body".to_string(),
                        ty: body,
                        optional: false,
                        description: None,
                        constraint: None,
                    }];
                    if let Some(headers) = headers {
                        fields.push(Field {
                            name: "headers".to_string(),
                            original_name: "headers".to_string(),
                            ty: headers.type_ref,
                            optional: headers.defaultable,
                            description: None,
                            constraint: None,
                        });
                    }
                    self.registry.require_import(class.clone());
                    self.registry.insert(
                        wrapper.clone(),
                        TypeDef::Record(RecordType {
                            name: wrapper.clone(),
                            description: None,
                            fields,
                            includes: vec![class],
                        }),
                    );
                }
                Ok(TypeRef::named(wrapper))
            }
        }
    }

    /// Model a header map as a synthetic object schema and run it through
    /// the record generator. The record is defaultable unless some required
    /// header has no default value to fall back on.
    pub fn headers_type(
        &mut self,
        name: &str,
        headers: &IndexMap<String, HeaderSpec>,
    ) -> Result<HeadersRecord, GenerateError> {
        let mut synthetic = Schema {
            schema_type: Some(TypeSet::Single(SchemaType::Object)),
            ..Schema::default()
        };
        for (header_name, header) in headers {
            synthetic
                .properties
                .insert(header_name.clone(), header.schema.clone());
            if header.required {
                synthetic.required.push(header_name.clone());
            }
        }
        let type_name = naming::type_name(name);
        self.define(&type_name, &synthetic)?;
        let defaultable = headers
            .values()
            .all(|h| !h.required || h.schema.default_value.is_some());
        Ok(HeadersRecord {
            type_ref: TypeRef::named(type_name),
            defaultable,
        })
    }
}

/// Build the cache-control directive string. Directive order is fixed;
/// absent directives are omitted, and the private/public slot always emits
/// one of the two.
pub fn cache_control_directives(config: &CacheControl) -> String {
    let mut parts: Vec<String> = Vec::new();
    if config.must_revalidate {
        parts.push("must-revalidate".to_string());
    }
    if config.no_cache {
        parts.push(directive_with_fields("no-cache", &config.no_cache_fields));
    }
    if config.no_store {
        parts.push("no-store".to_string());
    }
    if config.no_transform {
        parts.push("no-transform".to_string());
    }
    if config.private {
        parts.push(directive_with_fields("private", &config.private_fields));
    } else {
        parts.push("public".to_string());
    }
    if config.proxy_revalidate {
        parts.push("proxy-revalidate".to_string());
    }
    if let Some(age) = config.max_age {
        parts.push(format!("max-age={age}"));
    }
    if let Some(age) = config.s_max_age {
        parts.push(format!("s-maxage={age}"));
    }
    parts.join(",")
}

fn directive_with_fields(name: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        name.to_string()
    } else {
        format!("{name}=\"{}\"", fields.join(","))
    }
}
