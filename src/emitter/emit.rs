//! CSV data dictionary emitter
//!
//! One `<table>-dd.csv` file per table, one row per variable.

use std::path::{Path, PathBuf};
use crate::dictionary::{DataDictionary, PrimitiveType, Table};
use super::error::EmitError;

/// Column header shared by every dictionary file
pub const HEADER: [&str; 8] = [
    "variable_name",
    "description",
    "data_type",
    "min",
    "max",
    "units",
    "enumerations",
    "comment",
];

/// Suffix appended to the table name to form the file name
pub const FILE_SUFFIX: &str = "-dd.csv";

/// Path of the dictionary file for a table
pub fn table_path(dir: &Path, table_name: &str) -> PathBuf {
    dir.join(format!("{}{}", table_name, FILE_SUFFIX))
}

/// Write every table of the dictionary into `dir`, creating it if needed.
///
/// Returns the written paths in table order.
pub fn write_dictionary<P: AsRef<Path>>(
    dictionary: &DataDictionary,
    dir: P,
) -> Result<Vec<PathBuf>, EmitError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| EmitError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    dictionary
        .tables()
        .map(|table| write_table(table, dir))
        .collect()
}

/// Write a single table's dictionary file into an existing directory
pub fn write_table(table: &Table, dir: &Path) -> Result<PathBuf, EmitError> {
    let path = table_path(dir, table.name());
    let csv_err = |source: csv::Error| EmitError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
    writer.write_record(HEADER).map_err(csv_err)?;

    for variable in table.variables() {
        let data_type = variable.data_type().to_string();
        let enumerations = variable.enumerations_cell();
        // min and max are reserved for numeric ranges
        writer
            .write_record([
                variable.name(),
                variable.description(),
                data_type.as_str(),
                "",
                "",
                variable.units(),
                enumerations.as_str(),
                variable.comment(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|e| EmitError::Io {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(table = table.name(), path = %path.display(), "wrote data dictionary");
    Ok(path)
}

/// Newline-joined paths for human display
pub fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a dictionary file back into a table.
///
/// The table name is taken from the file name. Required and primary key
/// flags are not part of the file format and come back unset. Enumeration
/// tokens are split on the first `=`, so codes containing `=` or
/// descriptions containing `;` do not survive the trip.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, EmitError> {
    let path = path.as_ref();
    let invalid = |message: String| EmitError::InvalidDictionary {
        path: path.to_path_buf(),
        message,
    };
    let csv_err = |source: csv::Error| EmitError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let table_name = file_name
        .strip_suffix(FILE_SUFFIX)
        .ok_or_else(|| invalid(format!("file name does not end in '{}'", FILE_SUFFIX)))?;

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(invalid(format!("unexpected header: {:?}", headers)));
    }

    let mut table = Table::new(table_name, "");
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let field = |i: usize| record.get(i).unwrap_or_default();

        let data_type: PrimitiveType = field(2)
            .parse()
            .map_err(|e| invalid(format!("row {}: {}", index + 1, e)))?;

        let variable = table
            .add_variable(field(0), field(1))
            .map_err(|e| invalid(format!("row {}: {}", index + 1, e)))?;
        variable.set_data_type(data_type);
        variable.set_units(field(5));
        variable.set_comment(field(7));
        for token in field(6).split(';').filter(|t| !t.is_empty()) {
            match token.split_once('=') {
                Some((code, description)) => {
                    variable.add_enumeration(code, Some(description.to_string()))
                }
                None => variable.add_enumeration(token, None),
            }
        }
    }

    Ok(table)
}
