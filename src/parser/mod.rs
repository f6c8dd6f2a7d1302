//! Schema parser (verb module)
//!
//! `parse_*` reads a YAML document into a [`SchemaDefinition`] exactly as
//! written. `load_*` goes one step further and flattens it into an
//! [`InducedSchema`]: inherited, mixed-in and referenced slots are merged
//! into each class and `slot_usage` refinements applied, so every class
//! carries its full attribute list with ranges already classified.

use std::path::Path;
use crate::error::ParseError;
use crate::schema::{InducedSchema, SchemaDefinition};

/// Parse a schema definition from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SchemaDefinition, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a schema definition from a YAML string
pub fn parse_str(yaml: &str) -> Result<SchemaDefinition, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse and flatten a schema file in one step
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<InducedSchema, ParseError> {
    let definition = parse_file(path)?;
    Ok(InducedSchema::new(&definition))
}

/// Parse and flatten a schema string in one step
pub fn load_str(yaml: &str) -> Result<InducedSchema, ParseError> {
    let definition = parse_str(yaml)?;
    Ok(InducedSchema::new(&definition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Range, SchemaView};

    #[test]
    fn test_parse_clinical() {
        let definition = parse_file("tests/test_data/clinical.yaml").unwrap();
        assert_eq!(definition.name.as_deref(), Some("clinical"));
        assert_eq!(
            definition.classes.keys().collect::<Vec<_>>(),
            vec!["Entity", "Patient", "Clinician", "Visit"]
        );

        let schema = InducedSchema::new(&definition);
        let patient = schema.class("Patient").unwrap();
        assert!(patient.is_concrete());
        assert_eq!(patient.attribute("id").unwrap().range, Range::Named("integer".to_string()));
        assert_eq!(
            patient.attribute("status").unwrap().range,
            Range::Enum("PatientStatus".to_string())
        );
        assert!(!schema.class("Entity").unwrap().is_concrete());

        let status = schema.enum_def("PatientStatus").unwrap();
        let codes: Vec<&str> = status.permissible_values.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(codes, vec!["ACTIVE", "DECEASED"]);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("classes: [valid: yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("tests/test_data/does_not_exist.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("does_not_exist.yaml"));
    }

    #[test]
    fn test_empty_sections() {
        let schema = load_str("name: empty\nclasses:\n").unwrap();
        assert!(schema.classes().is_empty());
    }
}
