pub mod builder;
pub mod classify;
pub mod constraints;
pub mod naming;
pub mod response;

pub use builder::{GenContext, MAX_ARRAY_LENGTH, TypeBuilder};
pub use classify::{Strategy, classify};
pub use constraints::has_constraints;
pub use response::{HeadersRecord, cache_control_directives, status_class};

use log::debug;

use crate::config::GeneratorOptions;
use crate::error::{Diagnostic, TypeFailure};
use crate::ir::TypeRegistry;
use crate::schema::SchemaStore;

/// The result of one generation run: the populated registry, recoverable
/// diagnostics, and the names whose generation failed.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub registry: TypeRegistry,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<TypeFailure>,
}

/// Generate a named type for every schema in the store. A failure stops
/// only the affected name; the rest of the run proceeds.
pub fn generate(store: &SchemaStore, options: &GeneratorOptions) -> GenerationOutcome {
    let mut builder = TypeBuilder::new(GenContext {
        store,
        nullable: options.nullable,
    });
    let mut failures = Vec::new();
    for (name, schema) in store.iter() {
        debug!("generating type for schema {name}");
        if let Err(error) = builder.build_named(name, schema) {
            failures.push(TypeFailure {
                type_name: naming::type_name(name),
                error,
            });
        }
    }
    let (registry, diagnostics) = builder.into_parts();
    GenerationOutcome {
        registry,
        diagnostics,
        failures,
    }
}
