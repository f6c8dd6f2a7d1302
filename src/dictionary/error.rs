//! Dictionary model errors

use std::fmt;

/// Structural errors raised while populating a data dictionary
///
/// These point at a bug in whatever is driving the model, not at bad
/// schema input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// A table with this name already exists
    DuplicateTable(String),
    /// A variable with this name already exists in the table
    DuplicateVariable { table: String, variable: String },
    /// No variable with this name exists in the table
    UnknownVariable { table: String, variable: String },
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::DuplicateTable(name) => {
                write!(f, "Table '{}' already exists in the dictionary", name)
            }
            DictionaryError::DuplicateVariable { table, variable } => {
                write!(f, "Variable '{}' already exists in table '{}'", variable, table)
            }
            DictionaryError::UnknownVariable { table, variable } => {
                write!(f, "Variable '{}' not found in table '{}'", variable, table)
            }
        }
    }
}

impl std::error::Error for DictionaryError {}
