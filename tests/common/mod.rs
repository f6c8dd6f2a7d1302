//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::path::Path;
use datadict::{compile_schema, parser, Compilation, CompileOptions, InducedSchema};

/// Load and flatten a fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> InducedSchema {
    let path = format!("tests/test_data/{}", name);
    parser::load_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Run the compile pipeline (relational transform included) on a fixture
pub fn compile_fixture(name: &str, options: &CompileOptions) -> Compilation {
    let schema = load_fixture(name);
    compile_schema(&schema, options)
        .unwrap_or_else(|e| panic!("Failed to compile {}: {}", name, e))
}

/// Read a written dictionary file as raw CSV rows (header excluded)
pub fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path)
        .unwrap_or_else(|e| panic!("Failed to open {}: {}", path.display(), e));
    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// File names in a directory, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
