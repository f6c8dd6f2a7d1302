//! Types produced by range resolution

use std::fmt;
use crate::dictionary::{EnumerationValue, PrimitiveType};

/// A reference from a column to the identifier of another class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Referenced class
    pub class: String,
    /// Identifier slot of that class (alias if it declares one)
    pub slot: String,
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.slot)
    }
}

/// Outcome of resolving one attribute range
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub data_type: PrimitiveType,
    /// Permissible values, in declaration order
    pub enumerations: Vec<EnumerationValue>,
    /// Enum-level description used when the enum lists no values
    pub fallback_comment: Option<String>,
    /// Set when the range is a class
    pub foreign_key: Option<ForeignKeyRef>,
}

impl Resolution {
    pub fn of(data_type: PrimitiveType) -> Self {
        Self {
            data_type,
            enumerations: Vec::new(),
            fallback_comment: None,
            foreign_key: None,
        }
    }

    /// The safe default for anything that cannot be resolved
    pub fn string() -> Self {
        Self::of(PrimitiveType::String)
    }
}

/// Non-fatal problems met while resolving a range
///
/// Each one degrades the attribute to `string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// The range names nothing the schema or the type registry knows
    UnknownRange(String),
    /// A user type has neither `typeof` nor `base`
    UnknownBaseType(String),
    /// A class used as a range has no identifier slot
    MissingIdentifier(String),
    /// The chain of type or identifier indirections is too long (or cyclic)
    ResolutionDepthExceeded(String),
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::UnknownRange(name) => write!(f, "Unknown range '{}'", name),
            ResolveWarning::UnknownBaseType(name) => {
                write!(f, "Type '{}' declares no typeof or base", name)
            }
            ResolveWarning::MissingIdentifier(class) => {
                write!(f, "Class '{}' has no identifier slot", class)
            }
            ResolveWarning::ResolutionDepthExceeded(name) => {
                write!(f, "Resolution of '{}' exceeded the indirection limit", name)
            }
        }
    }
}
