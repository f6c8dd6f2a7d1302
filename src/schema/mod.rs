//! Schema types (nouns)
//!
//! `source` holds the definitions exactly as written in YAML; `view` holds
//! the flattened form the compiler reads through [`SchemaView`].

mod source;
mod view;

pub use source::{
    OrderedMap, SchemaDefinition, ClassDefinition, SlotDefinition, UnitDefinition,
    EnumDefinition, PermissibleValueDefinition, TypeDefinition,
};
pub use view::{
    SchemaView, InducedSchema, ClassView, SlotView, EnumView, PermissibleValue, TypeView, Range,
};
