//! Schema-to-type mapping engine.
//!
//! Walks a graph of named data schemas (objects, arrays, primitives,
//! unions, intersections) and produces a deduplicated, insertion-ordered
//! registry of named type definitions, along with validation-constraint
//! annotations, per-status-code response wrapper types, header records,
//! and cache-control directive strings.
//!
//! The boundary is purely in-memory: schemas in, a [`ir::TypeRegistry`]
//! plus diagnostics out. Rendering, file I/O, and host-language parsing
//! live elsewhere.

pub mod config;
pub mod error;
pub mod ir;
pub mod schema;
pub mod transform;

pub use config::GeneratorOptions;
pub use error::{Diagnostic, GenerateError, ParseError, Severity, TypeFailure};
pub use transform::{GenContext, GenerationOutcome, TypeBuilder, generate};
