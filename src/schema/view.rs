//! Flattened, read-only view of a schema
//!
//! `InducedSchema` applies inheritance (is_a, mixins), slot references,
//! inline attributes and slot_usage refinements so that every class carries
//! its full attribute list in declaration order. No validation is done:
//! inheritance cycles are cut and logged, missing references are ignored.

use super::source::{OrderedMap, SchemaDefinition, SlotDefinition};

/// Declared range of an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    /// No range declared
    Unspecified,
    /// Another class of the schema
    Class(String),
    /// An enumeration of the schema
    Enum(String),
    /// A type name: metamodel type, user type, or free-form alias
    Named(String),
}

/// A fully induced attribute of a class
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub range: Range,
    pub required: bool,
    pub minimum_cardinality: Option<u32>,
    pub multivalued: bool,
    pub identifier: bool,
    pub key: bool,
    /// UCUM code of the unit of measure
    pub unit_code: Option<String>,
    pub annotations: OrderedMap<serde_yaml::Value>,
}

impl SlotView {
    /// A plain attribute with the given range and no other facets
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: None,
            title: None,
            range,
            required: false,
            minimum_cardinality: None,
            multivalued: false,
            identifier: false,
            key: false,
            unit_code: None,
            annotations: OrderedMap::new(),
        }
    }

    /// Name used when this slot is referenced from elsewhere
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Required by flag or by a minimum cardinality of at least one
    pub fn is_required(&self) -> bool {
        self.required || self.minimum_cardinality.is_some_and(|n| n >= 1)
    }

    /// Explicit `primary_key` annotation
    ///
    /// Accepts `primary_key: true`, `primary_key: "true"` and the
    /// tag/value form `primary_key: {value: true}`.
    pub fn has_primary_key_annotation(&self) -> bool {
        self.annotations
            .get("primary_key")
            .is_some_and(annotation_is_true)
    }
}

fn annotation_is_true(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Bool(b) => *b,
        serde_yaml::Value::String(s) => s.eq_ignore_ascii_case("true"),
        serde_yaml::Value::Mapping(m) => m.get("value").is_some_and(annotation_is_true),
        _ => false,
    }
}

/// A class with its attributes flattened
#[derive(Debug, Clone, PartialEq)]
pub struct ClassView {
    pub name: String,
    pub description: Option<String>,
    pub is_abstract: bool,
    pub is_mixin: bool,
    pub attributes: Vec<SlotView>,
}

impl ClassView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_abstract: false,
            is_mixin: false,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&SlotView> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Concrete classes become tables; abstract classes and mixins do not
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_mixin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PermissibleValue {
    pub text: String,
    pub description: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumView {
    pub name: String,
    pub description: Option<String>,
    pub permissible_values: Vec<PermissibleValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeView {
    pub name: String,
    pub description: Option<String>,
    /// Parent type this one refines
    pub type_of: Option<String>,
    /// Base name the type is stored as
    pub base: Option<String>,
}

/// Read-only access to a flattened schema
pub trait SchemaView {
    /// All classes in declaration order, attributes already flattened
    fn classes(&self) -> &[ClassView];

    fn enums(&self) -> &[EnumView];

    fn types(&self) -> &[TypeView];

    fn class(&self, name: &str) -> Option<&ClassView> {
        self.classes().iter().find(|c| c.name == name)
    }

    fn enum_def(&self, name: &str) -> Option<&EnumView> {
        self.enums().iter().find(|e| e.name == name)
    }

    fn type_def(&self, name: &str) -> Option<&TypeView> {
        self.types().iter().find(|t| t.name == name)
    }

    /// The identifier slot of a class, falling back to its key slot
    fn identifier_slot(&self, class_name: &str) -> Option<&SlotView> {
        let class = self.class(class_name)?;
        class
            .attributes
            .iter()
            .find(|a| a.identifier)
            .or_else(|| class.attributes.iter().find(|a| a.key))
    }
}

/// A schema with inheritance applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InducedSchema {
    pub name: Option<String>,
    classes: Vec<ClassView>,
    enums: Vec<EnumView>,
    types: Vec<TypeView>,
}

impl InducedSchema {
    /// Build from already flattened parts
    pub fn from_parts(
        name: Option<String>,
        classes: Vec<ClassView>,
        enums: Vec<EnumView>,
        types: Vec<TypeView>,
    ) -> Self {
        Self { name, classes, enums, types }
    }

    /// Flatten a parsed schema document
    pub fn new(definition: &SchemaDefinition) -> Self {
        let classes = definition
            .classes
            .iter()
            .map(|(name, class)| {
                let mut visiting = Vec::new();
                let slots = collect_slots(definition, name, &mut visiting);
                ClassView {
                    name: name.to_string(),
                    description: class.description.clone(),
                    is_abstract: class.is_abstract,
                    is_mixin: class.is_mixin,
                    attributes: slots
                        .iter()
                        .map(|(slot_name, slot)| induce_slot(definition, slot_name, slot))
                        .collect(),
                }
            })
            .collect();

        let enums = definition
            .enums
            .iter()
            .map(|(name, e)| EnumView {
                name: name.to_string(),
                description: e.description.clone(),
                permissible_values: e
                    .permissible_values
                    .iter()
                    .map(|(code, pv)| PermissibleValue {
                        text: pv.text.clone().unwrap_or_else(|| code.to_string()),
                        description: pv.description.clone(),
                        title: pv.title.clone(),
                    })
                    .collect(),
            })
            .collect();

        let types = definition
            .types
            .iter()
            .map(|(name, t)| TypeView {
                name: name.to_string(),
                description: t.description.clone(),
                type_of: t.type_of.clone(),
                base: t.base.clone(),
            })
            .collect();

        Self {
            name: definition.name.clone(),
            classes,
            enums,
            types,
        }
    }
}

impl SchemaView for InducedSchema {
    fn classes(&self) -> &[ClassView] {
        &self.classes
    }

    fn enums(&self) -> &[EnumView] {
        &self.enums
    }

    fn types(&self) -> &[TypeView] {
        &self.types
    }
}

/// Gather the slot definitions of a class: ancestors first, then mixins,
/// referenced slots, inline attributes, and finally slot_usage.
fn collect_slots(
    definition: &SchemaDefinition,
    class_name: &str,
    visiting: &mut Vec<String>,
) -> OrderedMap<SlotDefinition> {
    let mut slots = OrderedMap::new();

    if visiting.iter().any(|v| v == class_name) {
        tracing::warn!(class = class_name, "inheritance cycle, ignoring repeated ancestor");
        return slots;
    }
    let Some(class) = definition.classes.get(class_name) else {
        tracing::debug!(class = class_name, "ancestor class not found, skipping");
        return slots;
    };
    visiting.push(class_name.to_string());

    let parents = class.is_a.iter().chain(class.mixins.iter());
    for parent in parents {
        for (name, slot) in collect_slots(definition, parent, visiting).iter() {
            merge_slot(&mut slots, name, slot);
        }
    }

    for name in &class.slots {
        let slot = definition.slots.get(name).cloned().unwrap_or_default();
        merge_slot(&mut slots, name, &slot);
    }

    for (name, slot) in class.attributes.iter() {
        merge_slot(&mut slots, name, slot);
    }

    for (name, usage) in class.slot_usage.iter() {
        if let Some(existing) = slots.get_mut(name) {
            existing.refine(usage);
        }
    }

    visiting.pop();
    slots
}

fn merge_slot(slots: &mut OrderedMap<SlotDefinition>, name: &str, slot: &SlotDefinition) {
    match slots.get_mut(name) {
        Some(existing) => existing.refine(slot),
        None => slots.insert(name, slot.clone()),
    }
}

fn induce_slot(definition: &SchemaDefinition, name: &str, slot: &SlotDefinition) -> SlotView {
    let range = match slot.range.as_ref().or(definition.default_range.as_ref()) {
        None => Range::Unspecified,
        Some(r) if definition.classes.contains_key(r) => Range::Class(r.clone()),
        Some(r) if definition.enums.contains_key(r) => Range::Enum(r.clone()),
        Some(r) => Range::Named(r.clone()),
    };

    SlotView {
        name: name.to_string(),
        alias: slot.alias.clone(),
        description: slot.description.clone(),
        title: slot.title.clone(),
        range,
        required: slot.required.unwrap_or(false),
        minimum_cardinality: slot.minimum_cardinality,
        multivalued: slot.multivalued.unwrap_or(false),
        identifier: slot.identifier.unwrap_or(false),
        key: slot.key.unwrap_or(false),
        unit_code: slot.unit.as_ref().and_then(|u| u.ucum_code.clone()),
        annotations: slot.annotations.clone(),
    }
}
