use indexmap::IndexMap;
use typegen_core::ir::{Primitive, TypeDef, TypeKind, TypeRef};
use typegen_core::schema::{
    self, CacheControl, HeaderSpec, HttpMethod, Parameter, ResponseSpec, Schema, SchemaStore,
    headers_from_parameters,
};
use typegen_core::transform::{GenContext, TypeBuilder, cache_control_directives};

fn parse(yaml: &str) -> Schema {
    serde_yaml_ng::from_str(yaml).unwrap()
}

fn builder(store: &SchemaStore) -> TypeBuilder<'_> {
    TypeBuilder::new(GenContext {
        store,
        nullable: false,
    })
}

#[test]
fn default_status_body_is_returned_bare() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let responses = [ResponseSpec::new(200, Some(parse("type: string")))];
    let ty = builder.response_type(HttpMethod::Get, &responses).unwrap();
    assert_eq!(ty, TypeRef::primitive(Primitive::String));
}

#[test]
fn post_unwraps_201_but_wraps_200() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);

    let created = [ResponseSpec::new(201, Some(parse("type: string")))];
    let ty = builder.response_type(HttpMethod::Post, &created).unwrap();
    assert_eq!(ty, TypeRef::primitive(Primitive::String));

    let ok = [ResponseSpec::new(200, Some(parse("type: string")))];
    let ty = builder.response_type(HttpMethod::Post, &ok).unwrap();
    assert_eq!(ty, TypeRef::named("OkString"));
}

#[test]
fn non_default_status_gets_a_wrapper_record() {
    let store = schema::from_yaml("Pet:\n  type: object\n  properties:\n    name: {type: string}\n")
        .unwrap();
    let mut builder = builder(&store);
    let responses = [ResponseSpec::new(
        404,
        Some(parse("$ref: '#/components/schemas/Pet'")),
    )];
    let ty = builder.response_type(HttpMethod::Get, &responses).unwrap();
    assert_eq!(ty, TypeRef::named("NotFoundPet"));

    let Some(TypeDef::Record(wrapper)) = builder.registry().get("NotFoundPet") else {
        panic!("the wrapper should be a record");
    };
    assert_eq!(wrapper.includes, vec!["NotFound".to_string()]);
    assert_eq!(wrapper.fields.len(), 1);
    assert_eq!(wrapper.fields[0].name, "body");
    assert!(!wrapper.fields[0].optional);
    assert_eq!(wrapper.fields[0].ty, TypeRef::named("Pet"));
    assert!(builder.registry().imports().any(|i| i == "NotFound"));
}

#[test]
fn bodyless_response_reduces_to_the_status_marker() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let responses = [ResponseSpec::new(204, None)];
    let ty = builder.response_type(HttpMethod::Delete, &responses).unwrap();
    assert_eq!(ty, TypeRef::named("NoContent"));
    assert!(builder.registry().imports().any(|i| i == "NoContent"));
}

#[test]
fn multiple_statuses_union_their_types() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let responses = [
        ResponseSpec::new(200, Some(parse("type: string"))),
        ResponseSpec::new(404, Some(parse("type: string"))),
    ];
    let ty = builder.response_type(HttpMethod::Get, &responses).unwrap();
    let TypeKind::Union(members) = ty.kind else {
        panic!("two statuses should produce a union");
    };
    assert_eq!(
        members,
        vec![
            TypeRef::primitive(Primitive::String),
            TypeRef::named("NotFoundString"),
        ]
    );
}

#[test]
fn no_responses_fall_back_to_any() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let ty = builder.response_type(HttpMethod::Get, &[]).unwrap();
    assert_eq!(ty, TypeRef::any());
}

#[test]
fn required_header_without_default_makes_headers_mandatory() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let mut response = ResponseSpec::new(404, Some(parse("type: string")));
    response.headers.insert(
        "X-Rate-Limit".to_string(),
        HeaderSpec {
            required: true,
            schema: parse("type: integer"),
        },
    );
    let ty = builder.response_type(HttpMethod::Get, &[response]).unwrap();
    assert_eq!(ty, TypeRef::named("NotFoundString"));

    let Some(TypeDef::Record(wrapper)) = builder.registry().get("NotFoundString") else {
        panic!("the wrapper should be a record");
    };
    let headers_field = wrapper.fields.iter().find(|f| f.name == "headers").unwrap();
    assert!(!headers_field.optional);
    assert_eq!(headers_field.ty, TypeRef::named("NotFoundHeaders"));

    let Some(TypeDef::Record(headers)) = builder.registry().get("NotFoundHeaders") else {
        panic!("the headers type should be a record");
    };
    assert_eq!(headers.fields[0].name, "xRateLimit");
    assert_eq!(headers.fields[0].original_name, "X-Rate-Limit");
    assert!(!headers.fields[0].optional);
}

#[test]
fn headers_default_when_every_required_header_has_a_default() {
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let mut headers: IndexMap<String, HeaderSpec> = IndexMap::new();
    headers.insert(
        "X-Trace-Id".to_string(),
        HeaderSpec {
            required: true,
            schema: parse("type: string\ndefault: none"),
        },
    );
    headers.insert(
        "X-Debug".to_string(),
        HeaderSpec {
            required: false,
            schema: parse("type: boolean"),
        },
    );
    let record = builder.headers_type("GetPetHeaders", &headers).unwrap();
    assert!(record.defaultable);
    assert_eq!(record.type_ref, TypeRef::named("GetPetHeaders"));
}

#[test]
fn header_parameters_feed_the_headers_record() {
    let params: Vec<Parameter> = serde_yaml_ng::from_str(
        r#"
- name: petId
  in: path
  required: true
- name: X-Api-Key
  in: header
  required: true
  schema:
    type: string
"#,
    )
    .unwrap();
    let headers = headers_from_parameters(&params);
    let store = SchemaStore::new();
    let mut builder = builder(&store);
    let record = builder.headers_type("ListPetsHeaders", &headers).unwrap();
    assert!(!record.defaultable);

    let Some(TypeDef::Record(def)) = builder.registry().get("ListPetsHeaders") else {
        panic!("the headers type should be a record");
    };
    assert_eq!(def.fields.len(), 1);
    assert_eq!(def.fields[0].original_name, "X-Api-Key");
}

#[test]
fn cache_control_orders_directives_deterministically() {
    let config: CacheControl = serde_yaml_ng::from_str(
        r#"
mustRevalidate: true
noCache: true
private: true
privateFields: [session]
maxAge: 3600
sMaxAge: 600
"#,
    )
    .unwrap();
    assert_eq!(
        cache_control_directives(&config),
        "must-revalidate,no-cache,private=\"session\",max-age=3600,s-maxage=600"
    );
}
