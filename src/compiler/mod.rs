//! Dictionary compiler (verb module)
//!
//! Schema view + options → DataDictionary.

mod compile;
mod error;
mod options;

pub use compile::{compile, compile_schema, Compilation};
pub use error::{CompileError, CompileWarning};
pub use options::{CompileOptions, NamingPolicy};
