//! Range resolution through the public API

use datadict::{
    compile, parser, resolve_alias, CompileOptions, PrimitiveType, Range, RangeResolver,
    ResolveWarning,
};

const SCHEMA: &str = r#"
enums:
  Letters:
    permissible_values:
      A:
        description: Alpha
      B:
  Pending:
    description: Values to be agreed
classes:
  Target:
    attributes:
      id:
        identifier: true
        range: integer
  Holder:
    attributes:
      target:
        range: Target
      letter:
        range: Letters
      pending:
        range: Pending
      mystery:
        range: NoSuchThing
"#;

#[test]
fn test_class_range_takes_identifier_type() {
    let schema = parser::load_str(SCHEMA).unwrap();
    let (resolution, warnings) =
        RangeResolver::new(&schema).resolve(&Range::Class("Target".to_string()));
    assert!(warnings.is_empty());
    assert_eq!(resolution.data_type, PrimitiveType::Integer);
    assert_eq!(resolution.foreign_key.unwrap().to_string(), "Target.id");
}

#[test]
fn test_compiled_columns() {
    let schema = parser::load_str(SCHEMA).unwrap();
    let compilation = compile(&schema, &CompileOptions::default()).unwrap();
    let holder = compilation.dictionary.table("Holder").unwrap();

    let target = holder.variable("target").unwrap();
    assert_eq!(target.data_type(), PrimitiveType::Integer);
    assert_eq!(target.comment(), "Target.id");

    let letter = holder.variable("letter").unwrap();
    assert_eq!(letter.data_type(), PrimitiveType::Enumeration);
    assert_eq!(letter.enumerations_cell(), "A=Alpha;B");
    assert_eq!(letter.comment(), "");

    let pending = holder.variable("pending").unwrap();
    assert_eq!(pending.data_type(), PrimitiveType::Enumeration);
    assert!(pending.enumerations().is_empty());
    assert_eq!(pending.comment(), "Values to be agreed");

    let mystery = holder.variable("mystery").unwrap();
    assert_eq!(mystery.data_type(), PrimitiveType::String);
    assert_eq!(compilation.warnings.len(), 1);
    assert_eq!(
        compilation.warnings[0].warning,
        ResolveWarning::UnknownRange("NoSuchThing".to_string())
    );
}

#[test]
fn test_alias_lookup_is_total() {
    for name in ["int", "Integer", "quantity", "number", "text", "enum", "", "blob", "uri"] {
        // never panics, always one of the four primitives
        let data_type = resolve_alias(name);
        assert!(matches!(
            data_type,
            PrimitiveType::Integer
                | PrimitiveType::Number
                | PrimitiveType::String
                | PrimitiveType::Enumeration
        ));
    }
    assert_eq!(resolve_alias("blob"), PrimitiveType::String);
    assert_eq!(resolve_alias("quantity"), PrimitiveType::Number);
}
