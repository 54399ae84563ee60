pub mod model;
pub mod operation;
pub mod store;

pub use model::{Exclusive, Schema, SchemaType, TypeSet};
pub use operation::{
    CacheControl, HeaderSpec, HttpMethod, Parameter, ParameterLocation, ResponseSpec,
    headers_from_parameters,
};
pub use store::{SchemaStore, from_json, from_yaml};
