//! Relational transform (verb module)
//!
//! Schema → schema in table form, per foreign key policy.

mod transform;

pub use transform::{transform, ForeignKeyPolicy};
