//! Range resolver (verb module)
//!
//! Turns an attribute's declared range into a primitive type, following
//! class identifiers, enumerations and type chains.

mod resolve;
mod types;

pub use resolve::{RangeResolver, resolve_units, MAX_RESOLUTION_DEPTH};
pub use types::{Resolution, ResolveWarning, ForeignKeyRef};
