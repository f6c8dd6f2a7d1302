//! datadict - Compile relational schemas into CSV data dictionaries
//!
//! This library provides:
//! - Schema definition types and YAML loading, with inheritance flattening
//! - Relational transform (join tables for multivalued references)
//! - Range resolution to primitive types (integer, number, string, enumeration)
//! - Data dictionary compilation
//! - CSV emission, one file per table
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `schema/` - schema definitions and the flattened `SchemaView`
//! - `dictionary/` - data dictionary model (DataDictionary, Table, Variable) and primitive types
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → SchemaDefinition → InducedSchema
//! - `relational/` - InducedSchema → InducedSchema in table form
//! - `resolver/` - Range → Resolution (primitive type, enumerations, foreign key)
//! - `compiler/` - SchemaView + CompileOptions → DataDictionary
//! - `emitter/` - DataDictionary → CSV files
//!
//! # Example
//!
//! ```ignore
//! use datadict::{parser, compile_schema, write_dictionary, display_paths, CompileOptions};
//!
//! let schema = parser::load_file("schema.yaml")?;
//! let compilation = compile_schema(&schema, &CompileOptions::default())?;
//! let paths = write_dictionary(&compilation.dictionary, "out")?;
//! println!("{}", display_paths(&paths));
//! ```

pub mod schema;
pub mod dictionary;
pub mod parser;
pub mod relational;
pub mod resolver;
pub mod compiler;
pub mod emitter;
pub mod error;

// Re-export commonly used types
pub use schema::{SchemaView, InducedSchema, ClassView, SlotView, Range};
pub use dictionary::{DataDictionary, Table, Variable, EnumerationValue, PrimitiveType, DictionaryError, resolve_alias};
pub use relational::ForeignKeyPolicy;
pub use resolver::{RangeResolver, Resolution, ResolveWarning};
pub use compiler::{compile, compile_schema, Compilation, CompileOptions, CompileError, CompileWarning, NamingPolicy};
pub use emitter::{write_dictionary, read_table, display_paths, EmitError};
pub use error::ParseError;
