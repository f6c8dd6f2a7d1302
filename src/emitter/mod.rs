//! Dictionary emitter (verb module)
//!
//! Writes a DataDictionary as CSV files.

mod emit;
mod error;

pub use emit::{
    write_dictionary, write_table, read_table, display_paths, table_path, HEADER, FILE_SUFFIX,
};
pub use error::EmitError;
