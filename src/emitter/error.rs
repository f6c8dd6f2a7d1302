//! Emitter errors

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum EmitError {
    /// Filesystem error (creating the output directory, opening a file)
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// CSV encoding or decoding error
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    /// A dictionary file read back does not have the expected shape
    InvalidDictionary {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            EmitError::Csv { path, source } => {
                write!(f, "CSV error on '{}': {}", path.display(), source)
            }
            EmitError::InvalidDictionary { path, message } => {
                write!(f, "Invalid data dictionary '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitError::Io { source, .. } => Some(source),
            EmitError::Csv { source, .. } => Some(source),
            EmitError::InvalidDictionary { .. } => None,
        }
    }
}
