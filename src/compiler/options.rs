//! Compilation options

use convert_case::{Case, Casing};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use crate::error::ParseError;
use crate::relational::ForeignKeyPolicy;

/// How emitted table and column names are cased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// Names as written in the schema
    #[default]
    Preserve,
    /// snake_case tables and columns
    Underscore,
    /// UpperCamelCase tables, lowerCamelCase columns
    Camelcase,
}

impl NamingPolicy {
    pub fn table_name(self, name: &str) -> String {
        match self {
            NamingPolicy::Preserve => name.to_string(),
            NamingPolicy::Underscore => name.to_case(Case::Snake),
            NamingPolicy::Camelcase => name.to_case(Case::Pascal),
        }
    }

    pub fn column_name(self, name: &str) -> String {
        match self {
            NamingPolicy::Preserve => name.to_string(),
            NamingPolicy::Underscore => name.to_case(Case::Snake),
            NamingPolicy::Camelcase => name.to_case(Case::Camel),
        }
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingPolicy::Preserve => write!(f, "preserve"),
            NamingPolicy::Underscore => write!(f, "underscore"),
            NamingPolicy::Camelcase => write!(f, "camelcase"),
        }
    }
}

impl FromStr for NamingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(NamingPolicy::Preserve),
            "underscore" | "snake" => Ok(NamingPolicy::Underscore),
            "camelcase" | "camel" => Ok(NamingPolicy::Camelcase),
            _ => Err(format!(
                "Unknown naming policy '{}'. Valid options: preserve, underscore, camelcase",
                s
            )),
        }
    }
}

/// Settings for one compilation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    #[serde(rename = "foreignKeys", alias = "foreign_keys")]
    pub foreign_keys: ForeignKeyPolicy,
    pub naming: NamingPolicy,
}

impl CompileOptions {
    /// Load options from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path_str = path.as_ref().display().to_string();
        let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path_str,
            source: e,
        })?;
        serde_yaml::from_str(&contents).map_err(ParseError::from)
    }

    pub fn with_foreign_keys(mut self, policy: ForeignKeyPolicy) -> Self {
        self.foreign_keys = policy;
        self
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_policies() {
        assert_eq!(NamingPolicy::Preserve.table_name("PatientVisit"), "PatientVisit");
        assert_eq!(NamingPolicy::Underscore.table_name("PatientVisit"), "patient_visit");
        assert_eq!(NamingPolicy::Underscore.column_name("birthDate"), "birth_date");
        assert_eq!(NamingPolicy::Camelcase.table_name("patient_visit"), "PatientVisit");
        assert_eq!(NamingPolicy::Camelcase.column_name("birth_date"), "birthDate");
    }

    #[test]
    fn test_parse_naming_policy() {
        assert_eq!("underscore".parse::<NamingPolicy>().unwrap(), NamingPolicy::Underscore);
        assert_eq!("CamelCase".parse::<NamingPolicy>().unwrap(), NamingPolicy::Camelcase);
        assert!("kebab".parse::<NamingPolicy>().is_err());
    }

    #[test]
    fn test_options_from_yaml() {
        let options: CompileOptions =
            serde_yaml::from_str("foreignKeys: disabled\nnaming: underscore\n").unwrap();
        assert_eq!(options.foreign_keys, ForeignKeyPolicy::Disabled);
        assert_eq!(options.naming, NamingPolicy::Underscore);

        let defaults: CompileOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(defaults, CompileOptions::default());
        assert!(defaults.foreign_keys.is_enabled());
    }
}
