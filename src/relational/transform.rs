//! Relational form: foreign key policy and join classes for multivalued references

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use crate::compiler::NamingPolicy;
use crate::schema::{ClassView, InducedSchema, Range, SchemaView, SlotView};

/// Whether class-to-class references are expressed as foreign keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeyPolicy {
    /// Reference columns are annotated and multivalued references get join tables
    #[default]
    Enabled,
    /// References resolve to the identifier type with no linkage recorded
    Disabled,
}

impl ForeignKeyPolicy {
    pub fn is_enabled(self) -> bool {
        self == ForeignKeyPolicy::Enabled
    }
}

impl From<bool> for ForeignKeyPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            ForeignKeyPolicy::Enabled
        } else {
            ForeignKeyPolicy::Disabled
        }
    }
}

impl fmt::Display for ForeignKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignKeyPolicy::Enabled => write!(f, "enabled"),
            ForeignKeyPolicy::Disabled => write!(f, "disabled"),
        }
    }
}

impl FromStr for ForeignKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enabled" | "true" | "on" => Ok(ForeignKeyPolicy::Enabled),
            "disabled" | "false" | "off" => Ok(ForeignKeyPolicy::Disabled),
            _ => Err(format!(
                "Unknown foreign key policy '{}'. Valid options: enabled, disabled",
                s
            )),
        }
    }
}

/// Rewrite a schema into relational form.
///
/// With foreign keys enabled, every multivalued attribute of a concrete
/// class whose range is another class moves into a join class named
/// `<Owner>_<attribute>` holding one reference to the owner and one to the
/// target. The join class is placed right after its owner. Owners without
/// an identifier keep the attribute inline since there is nothing to join on.
/// A join class whose emitted name under `naming` clashes with another
/// class, or with an earlier join class, is not created either.
///
/// With foreign keys disabled the schema is returned unchanged.
pub fn transform(
    schema: &InducedSchema,
    policy: ForeignKeyPolicy,
    naming: NamingPolicy,
) -> InducedSchema {
    if !policy.is_enabled() {
        return schema.clone();
    }

    let mut taken: HashSet<String> = schema
        .classes()
        .iter()
        .map(|c| naming.table_name(&c.name))
        .collect();

    let mut classes: Vec<ClassView> = Vec::with_capacity(schema.classes().len());
    for class in schema.classes() {
        let owner_id = schema.identifier_slot(&class.name);
        let mut owner = class.clone();
        let mut join_classes = Vec::new();

        if let Some(owner_id) = owner_id.filter(|_| class.is_concrete()) {
            owner.attributes.retain(|attr| {
                let Range::Class(target) = &attr.range else {
                    return true;
                };
                if !attr.multivalued {
                    return true;
                }
                let join_name = format!("{}_{}", class.name, attr.name);
                if !taken.insert(naming.table_name(&join_name)) {
                    tracing::warn!(
                        class = %class.name,
                        attribute = %attr.name,
                        "join class name '{}' already taken, keeping attribute inline",
                        join_name
                    );
                    return true;
                }
                join_classes.push(join_class(&join_name, class, owner_id, attr, target));
                false
            });
        }

        classes.push(owner);
        classes.extend(join_classes);
    }

    InducedSchema::from_parts(
        schema.name.clone(),
        classes,
        schema.enums().to_vec(),
        schema.types().to_vec(),
    )
}

fn join_class(
    join_name: &str,
    owner: &ClassView,
    owner_id: &SlotView,
    attr: &SlotView,
    target: &str,
) -> ClassView {
    tracing::debug!(owner = %owner.name, attribute = %attr.name, "creating join class {}", join_name);

    let mut owner_ref = SlotView::new(
        format!("{}_{}", owner.name, owner_id.display_name()),
        Range::Class(owner.name.clone()),
    );
    owner_ref.description = Some(format!("Reference to {}", owner.name));
    owner_ref.required = true;

    let mut target_ref = SlotView::new(attr.name.clone(), Range::Class(target.to_string()));
    target_ref.description = attr.description.clone();
    target_ref.required = true;

    let mut join = ClassView::new(join_name);
    join.description = Some(format!(
        "Links {} to {} through '{}'",
        owner.name, target, attr.name
    ));
    join.attributes = vec![owner_ref, target_ref];
    join
}
