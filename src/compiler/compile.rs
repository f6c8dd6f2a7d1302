//! Dictionary compilation: schema view to DataDictionary

use crate::dictionary::{DataDictionary, Table};
use crate::relational;
use crate::resolver::{resolve_units, RangeResolver};
use crate::schema::{ClassView, InducedSchema, SchemaView};
use super::error::{CompileError, CompileWarning};
use super::options::CompileOptions;

/// Result of a compilation: the dictionary plus everything that degraded
#[derive(Debug)]
pub struct Compilation {
    pub dictionary: DataDictionary,
    /// Resolution warnings, in the order the columns were compiled
    pub warnings: Vec<CompileWarning>,
}

impl Compilation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Apply the relational transform, then compile.
///
/// This is the full pipeline the CLI runs.
pub fn compile_schema(
    schema: &InducedSchema,
    options: &CompileOptions,
) -> Result<Compilation, CompileError> {
    let relational = relational::transform(schema, options.foreign_keys, options.naming);
    compile(&relational, options)
}

/// Compile a schema view into a data dictionary.
///
/// One table per concrete class, one variable per flattened attribute, both
/// in declaration order. Abstract classes and mixins produce nothing.
/// Range problems never fail the run; they come back as warnings and are
/// logged once at the end.
pub fn compile<V: SchemaView + ?Sized>(
    view: &V,
    options: &CompileOptions,
) -> Result<Compilation, CompileError> {
    let resolver = RangeResolver::new(view);
    let mut dictionary = DataDictionary::new();
    let mut warnings = Vec::new();

    for class in view.classes().iter().filter(|c| c.is_concrete()) {
        let table_name = options.naming.table_name(&class.name);
        let table = dictionary.add_table(
            table_name,
            class.description.clone().unwrap_or_default(),
        )?;
        compile_class(view, &resolver, class, table, options, &mut warnings)?;
        tracing::debug!(
            table = table.name(),
            variables = table.variables().len(),
            "compiled table"
        );
    }

    for warning in &warnings {
        tracing::warn!(
            table = %warning.table,
            variable = %warning.variable,
            "{}",
            warning.warning
        );
    }

    Ok(Compilation { dictionary, warnings })
}

fn compile_class<V: SchemaView + ?Sized>(
    view: &V,
    resolver: &RangeResolver<'_, V>,
    class: &ClassView,
    table: &mut Table,
    options: &CompileOptions,
    warnings: &mut Vec<CompileWarning>,
) -> Result<(), CompileError> {
    let identifier = view.identifier_slot(&class.name).map(|slot| slot.name.as_str());

    for attr in &class.attributes {
        let column = options.naming.column_name(&attr.name);
        let (resolution, attr_warnings) = resolver.resolve(&attr.range);

        let comment = match (&resolution.foreign_key, &resolution.fallback_comment) {
            (Some(fk), _) if options.foreign_keys.is_enabled() => format!(
                "{}.{}",
                options.naming.table_name(&fk.class),
                options.naming.column_name(&fk.slot)
            ),
            (_, Some(description)) => description.clone(),
            _ => String::new(),
        };

        let variable = table.add_variable(&column, attr.description.clone().unwrap_or_default())?;
        for value in &resolution.enumerations {
            variable.add_enumeration(value.code(), value.description().map(str::to_string));
        }
        variable.set_units(resolve_units(attr));
        variable.set_comment(comment);
        variable.set_primary_key(
            identifier == Some(attr.name.as_str()) || attr.has_primary_key_annotation(),
        );

        table.set_datatype(&column, resolution.data_type)?;
        if attr.is_required() {
            table.set_required(&column)?;
        }

        warnings.extend(attr_warnings.into_iter().map(|warning| CompileWarning {
            table: table.name().to_string(),
            variable: column.clone(),
            warning,
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryError, PrimitiveType};
    use crate::parser::load_str;
    use crate::relational::ForeignKeyPolicy;
    use crate::resolver::ResolveWarning;
    use crate::compiler::NamingPolicy;

    const YAML: &str = r#"
enums:
  Letters:
    description: Letters
    permissible_values:
      A: {description: Alpha}
      B:
  Reserved:
    description: Reserved for future use
classes:
  Entity:
    abstract: true
    attributes:
      id: {identifier: true, range: integer}
  Patient:
    is_a: Entity
    description: A person receiving care
    attributes:
      letter: {range: Letters, required: true}
      reserved: {range: Reserved}
      note: {}
      weight: {range: float, unit: {ucum_code: kg}}
      mystery: {range: Unobtainium}
  Visit:
    attributes:
      visitNumber: {range: integer, annotations: {primary_key: true}}
      patient: {range: Patient, minimum_cardinality: 1}
"#;

    fn compiled(options: CompileOptions) -> Compilation {
        let schema = load_str(YAML).unwrap();
        compile(&schema, &options).unwrap()
    }

    #[test]
    fn test_abstract_classes_produce_no_table() {
        let result = compiled(CompileOptions::default());
        assert_eq!(result.dictionary.table_names(), vec!["Patient", "Visit"]);
        assert!(result.dictionary.table("Entity").is_none());
    }

    #[test]
    fn test_inherited_identifier_is_primary_key() {
        let result = compiled(CompileOptions::default());
        let patient = result.dictionary.table("Patient").unwrap();
        assert_eq!(patient.description(), "A person receiving care");
        let id = patient.variable("id").unwrap();
        assert!(id.is_primary_key());
        assert_eq!(id.data_type(), PrimitiveType::Integer);
        assert_eq!(patient.variables()[0].name(), "id");
    }

    #[test]
    fn test_enumeration_columns() {
        let result = compiled(CompileOptions::default());
        let patient = result.dictionary.table("Patient").unwrap();

        let letter = patient.variable("letter").unwrap();
        assert_eq!(letter.data_type(), PrimitiveType::Enumeration);
        assert_eq!(letter.enumerations_cell(), "A=Alpha;B");
        assert_eq!(letter.comment(), "");
        assert!(letter.is_required());

        let reserved = patient.variable("reserved").unwrap();
        assert_eq!(reserved.data_type(), PrimitiveType::Enumeration);
        assert!(reserved.enumerations().is_empty());
        assert_eq!(reserved.comment(), "Reserved for future use");
    }

    #[test]
    fn test_unspecified_range_and_units() {
        let result = compiled(CompileOptions::default());
        let patient = result.dictionary.table("Patient").unwrap();

        let note = patient.variable("note").unwrap();
        assert_eq!(note.data_type(), PrimitiveType::String);
        assert!(note.enumerations().is_empty());
        assert_eq!(note.comment(), "");
        assert!(!note.is_required());

        let weight = patient.variable("weight").unwrap();
        assert_eq!(weight.data_type(), PrimitiveType::Number);
        assert_eq!(weight.units(), "UCUM:kg");
    }

    #[test]
    fn test_unknown_range_is_a_warning_not_an_error() {
        let result = compiled(CompileOptions::default());
        let mystery = result.dictionary.table("Patient").unwrap().variable("mystery").unwrap();
        assert_eq!(mystery.data_type(), PrimitiveType::String);
        assert_eq!(
            result.warnings,
            vec![CompileWarning {
                table: "Patient".to_string(),
                variable: "mystery".to_string(),
                warning: ResolveWarning::UnknownRange("Unobtainium".to_string()),
            }]
        );
        assert_eq!(result.warnings[0].to_string(), "Patient.mystery: Unknown range 'Unobtainium'");
    }

    #[test]
    fn test_foreign_key_comment() {
        let result = compiled(CompileOptions::default());
        let visit = result.dictionary.table("Visit").unwrap();
        let patient = visit.variable("patient").unwrap();
        assert_eq!(patient.data_type(), PrimitiveType::Integer);
        assert_eq!(patient.comment(), "Patient.id");
        assert!(patient.is_required());
        assert!(visit.variable("visitNumber").unwrap().is_primary_key());
        assert!(!patient.is_primary_key());
    }

    #[test]
    fn test_foreign_keys_disabled() {
        let result = compiled(CompileOptions::default().with_foreign_keys(ForeignKeyPolicy::Disabled));
        let patient = result.dictionary.table("Visit").unwrap().variable("patient").unwrap();
        assert_eq!(patient.data_type(), PrimitiveType::Integer);
        assert_eq!(patient.comment(), "");
    }

    #[test]
    fn test_naming_policy_applies_to_tables_columns_and_references() {
        let result = compiled(CompileOptions::default().with_naming(NamingPolicy::Underscore));
        assert_eq!(result.dictionary.table_names(), vec!["patient", "visit"]);
        let visit = result.dictionary.table("visit").unwrap();
        assert!(visit.variable("visit_number").unwrap().is_primary_key());
        assert_eq!(visit.variable("patient").unwrap().comment(), "patient.id");
    }

    #[test]
    fn test_name_collision_after_renaming_is_an_error() {
        let schema = load_str(
            r#"
classes:
  Thing:
    attributes:
      fooBar: {}
      foo_bar: {}
"#,
        )
        .unwrap();
        let options = CompileOptions::default().with_naming(NamingPolicy::Underscore);
        let err = compile(&schema, &options).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Dictionary(DictionaryError::DuplicateVariable { .. })
        ));
    }

    #[test]
    fn test_compile_schema_adds_join_tables() {
        let schema = load_str(
            r#"
classes:
  Patient:
    attributes:
      id: {identifier: true, range: integer}
      conditions: {range: Condition, multivalued: true}
  Condition:
    attributes:
      code: {identifier: true, range: string}
"#,
        )
        .unwrap();

        let result = compile_schema(&schema, &CompileOptions::default()).unwrap();
        assert_eq!(
            result.dictionary.table_names(),
            vec!["Patient", "Patient_conditions", "Condition"]
        );
        let join = result.dictionary.table("Patient_conditions").unwrap();
        let owner = join.variable("Patient_id").unwrap();
        assert_eq!(owner.data_type(), PrimitiveType::Integer);
        assert_eq!(owner.comment(), "Patient.id");
        let target = join.variable("conditions").unwrap();
        assert_eq!(target.data_type(), PrimitiveType::String);
        assert_eq!(target.comment(), "Condition.code");

        let disabled = CompileOptions::default().with_foreign_keys(ForeignKeyPolicy::Disabled);
        let result = compile_schema(&schema, &disabled).unwrap();
        assert_eq!(result.dictionary.table_names(), vec!["Patient", "Condition"]);
    }

    #[test]
    fn test_join_table_clashing_after_renaming_is_skipped() {
        let schema = load_str(
            r#"
classes:
  Visit:
    attributes:
      id: {identifier: true, range: integer}
      clinicians: {range: Clinician, multivalued: true}
  Clinician:
    attributes:
      id: {identifier: true, range: integer}
  VisitClinicians:
    attributes:
      note: {range: string}
"#,
        )
        .unwrap();

        let options = CompileOptions::default().with_naming(NamingPolicy::Underscore);
        let result = compile_schema(&schema, &options).unwrap();
        assert_eq!(
            result.dictionary.table_names(),
            vec!["visit", "clinician", "visit_clinicians"]
        );
        let clinicians = result.dictionary.table("visit").unwrap().variable("clinicians").unwrap();
        assert_eq!(clinicians.data_type(), PrimitiveType::Integer);
        assert_eq!(clinicians.comment(), "clinician.id");
        let existing = result.dictionary.table("visit_clinicians").unwrap();
        assert!(existing.variable("note").is_some());
    }
}
