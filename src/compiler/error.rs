//! Compiler errors and warnings

use std::fmt;
use crate::dictionary::DictionaryError;
use crate::resolver::ResolveWarning;

/// Errors that abort a compilation
#[derive(Debug)]
pub enum CompileError {
    /// The dictionary model rejected an insert or update
    Dictionary(DictionaryError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Dictionary(err) => write!(f, "Dictionary error: {}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Dictionary(err) => Some(err),
        }
    }
}

impl From<DictionaryError> for CompileError {
    fn from(err: DictionaryError) -> Self {
        CompileError::Dictionary(err)
    }
}

/// A resolution warning tied to the column it affected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileWarning {
    pub table: String,
    pub variable: String,
    pub warning: ResolveWarning,
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.table, self.variable, self.warning)
    }
}
