//! Data dictionary entities: dictionary, tables, variables and enumeration values

use std::collections::HashMap;
use std::fmt;
use super::error::DictionaryError;
use super::types::PrimitiveType;

/// A permissible value of an enumerated column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationValue {
    code: String,
    description: Option<String>,
}

impl EnumerationValue {
    pub fn new(code: impl Into<String>, description: Option<String>) -> Self {
        Self {
            code: code.into(),
            description: description.filter(|d| !d.is_empty()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Renders as `code=description`, or the bare code when there is no description
impl fmt::Display for EnumerationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}={}", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}

/// A column of a dictionary table
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    description: String,
    data_type: PrimitiveType,
    required: bool,
    is_primary_key: bool,
    units: String,
    comment: String,
    enumerations: Vec<EnumerationValue>,
}

impl Variable {
    fn new(name: String, description: String) -> Self {
        Self {
            name,
            description,
            data_type: PrimitiveType::default(),
            required: false,
            is_primary_key: false,
            units: String::new(),
            comment: String::new(),
            enumerations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data_type(&self) -> PrimitiveType {
        self.data_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn enumerations(&self) -> &[EnumerationValue] {
        &self.enumerations
    }

    pub fn set_data_type(&mut self, data_type: PrimitiveType) {
        self.data_type = data_type;
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn set_primary_key(&mut self, is_primary_key: bool) {
        self.is_primary_key = is_primary_key;
    }

    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Append a permissible value. Call order is output order.
    pub fn add_enumeration(&mut self, code: impl Into<String>, description: Option<String>) {
        self.enumerations.push(EnumerationValue::new(code, description));
    }

    /// The enumerations cell: tokens joined with `;`, empty when there are none
    pub fn enumerations_cell(&self) -> String {
        self.enumerations
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// A dictionary table: one per concrete schema class
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    description: String,
    variables: Vec<Variable>,
    lookup: HashMap<String, usize>,
}

impl Table {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variables: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Variables in declaration order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.lookup.get(name).map(|&i| &self.variables[i])
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let index = *self.lookup.get(name)?;
        Some(&mut self.variables[index])
    }

    /// Add a new variable, failing if the name is already taken
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Variable, DictionaryError> {
        let name = name.into();
        if self.lookup.contains_key(&name) {
            return Err(DictionaryError::DuplicateVariable {
                table: self.name.clone(),
                variable: name,
            });
        }
        let index = self.variables.len();
        self.lookup.insert(name.clone(), index);
        self.variables.push(Variable::new(name, description.into()));
        Ok(&mut self.variables[index])
    }

    pub fn set_required(&mut self, name: &str) -> Result<(), DictionaryError> {
        self.existing_mut(name)?.set_required(true);
        Ok(())
    }

    pub fn set_datatype(&mut self, name: &str, data_type: PrimitiveType) -> Result<(), DictionaryError> {
        self.existing_mut(name)?.set_data_type(data_type);
        Ok(())
    }

    pub fn set_primary_key(&mut self, name: &str) -> Result<(), DictionaryError> {
        self.existing_mut(name)?.set_primary_key(true);
        Ok(())
    }

    fn existing_mut(&mut self, name: &str) -> Result<&mut Variable, DictionaryError> {
        let table = self.name.clone();
        self.variable_mut(name).ok_or_else(|| DictionaryError::UnknownVariable {
            table,
            variable: name.to_string(),
        })
    }
}

/// The compiled data dictionary: tables in schema declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataDictionary {
    tables: Vec<Table>,
    lookup: HashMap<String, usize>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new table. Two tables may never share a name.
    pub fn add_table(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Table, DictionaryError> {
        let name = name.into();
        if self.lookup.contains_key(&name) {
            return Err(DictionaryError::DuplicateTable(name));
        }
        let index = self.tables.len();
        self.lookup.insert(name.clone(), index);
        self.tables.push(Table::new(name, description));
        Ok(&mut self.tables[index])
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.lookup.get(name).map(|&i| &self.tables[i])
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
