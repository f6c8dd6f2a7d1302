//! Primitive output types and the type-name alias registry

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Data types a dictionary column can carry
///
/// The set is closed: every schema range ends up as one of these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Whole integer values
    Integer,
    /// Floating point or decimal numbers
    Number,
    /// Free text
    String,
    /// Value constrained to an enumerated set
    Enumeration,
}

impl Default for PrimitiveType {
    fn default() -> Self {
        PrimitiveType::String
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Enumeration => write!(f, "enumeration"),
        }
    }
}

/// Look up a free-form type name in the alias table.
///
/// Matching is case-insensitive. Returns `None` for names the registry
/// does not know.
pub fn lookup_alias(name: &str) -> Option<PrimitiveType> {
    match name.trim().to_lowercase().as_str() {
        "int" | "integer" => Some(PrimitiveType::Integer),
        "number" | "quantity" | "numeric" | "float" | "double" | "decimal" => {
            Some(PrimitiveType::Number)
        }
        "str" | "string" | "text" => Some(PrimitiveType::String),
        "enum" | "enumeration" => Some(PrimitiveType::Enumeration),
        _ => None,
    }
}

/// Resolve a free-form type name to a primitive type.
///
/// Total: anything the registry does not recognize is a `String`.
pub fn resolve_alias(name: &str) -> PrimitiveType {
    lookup_alias(name).unwrap_or_default()
}

/// Error when parsing a rendered data type name
#[derive(Debug, Clone)]
pub struct ParsePrimitiveTypeError {
    pub input: String,
}

impl fmt::Display for ParsePrimitiveTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown data type '{}'. Valid options: integer, number, string, enumeration",
            self.input
        )
    }
}

impl std::error::Error for ParsePrimitiveTypeError {}

/// Strict parse of the rendered form (`integer`, `number`, ...).
///
/// Unlike [`resolve_alias`] this rejects unknown input; it is meant for
/// reading dictionaries back, not for interpreting schema type names.
impl FromStr for PrimitiveType {
    type Err = ParsePrimitiveTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(PrimitiveType::Integer),
            "number" => Ok(PrimitiveType::Number),
            "string" => Ok(PrimitiveType::String),
            "enumeration" => Ok(PrimitiveType::Enumeration),
            _ => Err(ParsePrimitiveTypeError { input: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for PrimitiveType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PrimitiveType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PrimitiveType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
