//! Range resolution: class identifiers, enumerations and type chains

use crate::dictionary::{lookup_alias, resolve_alias, EnumerationValue, PrimitiveType};
use crate::schema::{Range, SchemaView, SlotView};
use super::types::{ForeignKeyRef, Resolution, ResolveWarning};

/// Maximum number of indirections (type chain steps and class identifier
/// hops) followed for one range.
///
/// Schema views are expected to hand over acyclic type chains; the limit
/// turns a violation into a warning instead of a stack overflow.
pub const MAX_RESOLUTION_DEPTH: usize = 32;

/// Built-in metamodel types and the base names they are stored as
const METAMODEL_TYPES: &[(&str, &str)] = &[
    ("string", "str"),
    ("integer", "int"),
    ("boolean", "Bool"),
    ("float", "float"),
    ("double", "float"),
    ("decimal", "Decimal"),
    ("time", "XSDTime"),
    ("date", "XSDDate"),
    ("datetime", "XSDDateTime"),
    ("date_or_datetime", "str"),
    ("uriorcurie", "URIorCURIE"),
    ("curie", "Curie"),
    ("uri", "URI"),
    ("ncname", "NCName"),
    ("objectidentifier", "ElementIdentifier"),
    ("nodeidentifier", "NodeIdentifier"),
    ("jsonpointer", "str"),
    ("jsonpath", "str"),
    ("sparqlpath", "str"),
];

fn metamodel_base(name: &str) -> Option<&'static str> {
    METAMODEL_TYPES
        .iter()
        .find(|(type_name, _)| *type_name == name)
        .map(|(_, base)| *base)
}

fn is_metamodel_base(name: &str) -> bool {
    METAMODEL_TYPES.iter().any(|(_, base)| *base == name)
}

/// Resolves attribute ranges against a schema view
pub struct RangeResolver<'a, V: SchemaView + ?Sized> {
    view: &'a V,
}

impl<'a, V: SchemaView + ?Sized> RangeResolver<'a, V> {
    pub fn new(view: &'a V) -> Self {
        Self { view }
    }

    /// Resolve a range to a primitive type.
    ///
    /// Total: problems are reported as warnings and the attribute degrades
    /// to `string`.
    pub fn resolve(&self, range: &Range) -> (Resolution, Vec<ResolveWarning>) {
        let mut warnings = Vec::new();
        let resolution = self.resolve_range(range, 0, &mut warnings);
        (resolution, warnings)
    }

    fn resolve_range(
        &self,
        range: &Range,
        depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Resolution {
        match range {
            Range::Unspecified => Resolution::string(),
            Range::Class(name) => self.resolve_class(name, depth, warnings),
            Range::Enum(name) => self.resolve_enum(name, warnings),
            Range::Named(name) => self.resolve_named(name, depth, warnings),
        }
    }

    /// A class range takes the type of the class identifier
    fn resolve_class(
        &self,
        class_name: &str,
        depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Resolution {
        if depth >= MAX_RESOLUTION_DEPTH {
            warnings.push(ResolveWarning::ResolutionDepthExceeded(class_name.to_string()));
            return Resolution::string();
        }
        if self.view.class(class_name).is_none() {
            warnings.push(ResolveWarning::UnknownRange(class_name.to_string()));
            return Resolution::string();
        }
        let Some(identifier) = self.view.identifier_slot(class_name) else {
            warnings.push(ResolveWarning::MissingIdentifier(class_name.to_string()));
            return Resolution::string();
        };

        let mut resolution = self.resolve_range(&identifier.range, depth + 1, warnings);
        resolution.foreign_key = Some(ForeignKeyRef {
            class: class_name.to_string(),
            slot: identifier.display_name().to_string(),
        });
        resolution
    }

    fn resolve_enum(&self, enum_name: &str, warnings: &mut Vec<ResolveWarning>) -> Resolution {
        let Some(enum_def) = self.view.enum_def(enum_name) else {
            warnings.push(ResolveWarning::UnknownRange(enum_name.to_string()));
            return Resolution::string();
        };

        let mut resolution = Resolution::of(PrimitiveType::Enumeration);
        resolution.enumerations = enum_def
            .permissible_values
            .iter()
            .map(|pv| {
                let description = pv.description.clone().or_else(|| pv.title.clone());
                EnumerationValue::new(pv.text.clone(), description)
            })
            .collect();

        if resolution.enumerations.is_empty() {
            resolution.fallback_comment = enum_def.description.clone();
        }
        resolution
    }

    /// Walk a type-name chain until it lands on a class, an enum, or a
    /// name the type registry can map.
    fn resolve_named(
        &self,
        type_name: &str,
        depth: usize,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Resolution {
        let mut current = type_name.to_string();
        let mut depth = depth;

        loop {
            if depth >= MAX_RESOLUTION_DEPTH {
                warnings.push(ResolveWarning::ResolutionDepthExceeded(type_name.to_string()));
                return Resolution::string();
            }

            if self.view.class(&current).is_some() {
                return self.resolve_class(&current, depth, warnings);
            }
            if self.view.enum_def(&current).is_some() {
                return self.resolve_enum(&current, warnings);
            }
            if let Some(base) = metamodel_base(&current) {
                return Resolution::of(resolve_alias(base));
            }
            if is_metamodel_base(&current) {
                return Resolution::of(resolve_alias(&current));
            }

            // Schema types shadow registry aliases of the same name
            if let Some(type_def) = self.view.type_def(&current) {
                match type_def.type_of.as_ref().or(type_def.base.as_ref()) {
                    Some(next) => {
                        current = next.clone();
                        depth += 1;
                        continue;
                    }
                    None => {
                        warnings.push(ResolveWarning::UnknownBaseType(current));
                        return Resolution::string();
                    }
                }
            }

            if let Some(data_type) = lookup_alias(&current) {
                return Resolution::of(data_type);
            }
            warnings.push(ResolveWarning::UnknownRange(current));
            return Resolution::string();
        }
    }
}

/// Units column value for a slot: `UCUM:<code>`, or empty
pub fn resolve_units(slot: &SlotView) -> String {
    match slot.unit_code.as_deref() {
        Some(code) if !code.is_empty() => format!("UCUM:{}", code),
        _ => String::new(),
    }
}
