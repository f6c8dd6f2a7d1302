//! Data dictionary types (nouns)
//!
//! The in-memory dictionary a compilation produces: tables of variables,
//! each carrying a resolved primitive type.

mod error;
mod model;
mod types;

pub use error::DictionaryError;
pub use model::{DataDictionary, Table, Variable, EnumerationValue};
pub use types::{PrimitiveType, ParsePrimitiveTypeError, lookup_alias, resolve_alias};
