//! Raw schema definitions as they appear in the YAML source

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// A name-keyed map that keeps declaration order
///
/// Class, slot and permissible value order in the source is meaningful
/// (it becomes table, column and enumeration order), so YAML mappings are
/// read into a vector of pairs rather than a hash map. A `null` value
/// deserializes as `T::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T>(Vec<(String, T)>);

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.0.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert, replacing an existing entry in place
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for OrderedMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'de, T> Deserialize<'de> for OrderedMap<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for OrderedMapVisitor<T>
        where
            T: Deserialize<'de> + Default,
        {
            type Value = OrderedMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a mapping of names to definitions")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedMap::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::new();
                while let Some((key, value)) =
                    access.next_entry::<serde_yaml::Value, Option<T>>()?
                {
                    // Codes like `1:` or `true:` are legal keys
                    let key = match key {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "unsupported mapping key: {:?}",
                                other
                            )))
                        }
                    };
                    map.insert(key, value.unwrap_or_default());
                }
                Ok(map)
            }
        }

        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

/// Root of a schema document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDefinition {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Range applied to slots that declare none
    pub default_range: Option<String>,
    #[serde(default)]
    pub classes: OrderedMap<ClassDefinition>,
    #[serde(default)]
    pub slots: OrderedMap<SlotDefinition>,
    #[serde(default)]
    pub enums: OrderedMap<EnumDefinition>,
    #[serde(default)]
    pub types: OrderedMap<TypeDefinition>,
}

/// A class (table) definition before inheritance is applied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassDefinition {
    pub description: Option<String>,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(rename = "mixin", default)]
    pub is_mixin: bool,
    pub is_a: Option<String>,
    #[serde(default)]
    pub mixins: Vec<String>,
    /// References to schema-level slots
    #[serde(default)]
    pub slots: Vec<String>,
    /// Inline slot definitions
    #[serde(default)]
    pub attributes: OrderedMap<SlotDefinition>,
    /// Refinements of inherited or referenced slots
    #[serde(default)]
    pub slot_usage: OrderedMap<SlotDefinition>,
}

/// A slot (attribute) definition
///
/// Every field is optional so that `slot_usage` and subclass attributes
/// can refine only what they mention.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotDefinition {
    pub description: Option<String>,
    pub title: Option<String>,
    pub alias: Option<String>,
    pub range: Option<String>,
    pub required: Option<bool>,
    pub identifier: Option<bool>,
    pub key: Option<bool>,
    pub multivalued: Option<bool>,
    pub minimum_cardinality: Option<u32>,
    pub unit: Option<UnitDefinition>,
    #[serde(default)]
    pub annotations: OrderedMap<serde_yaml::Value>,
}

/// Unit of measure attached to a slot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitDefinition {
    #[serde(alias = "code")]
    pub ucum_code: Option<String>,
    pub symbol: Option<String>,
}

/// An enumeration definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumDefinition {
    pub description: Option<String>,
    #[serde(default)]
    pub permissible_values: OrderedMap<PermissibleValueDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissibleValueDefinition {
    pub text: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
}

/// A named type: an alias over another type or a base name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeDefinition {
    pub description: Option<String>,
    #[serde(rename = "typeof")]
    pub type_of: Option<String>,
    pub base: Option<String>,
    pub uri: Option<String>,
}

impl SlotDefinition {
    /// Overlay the fields `other` sets onto `self`
    pub fn refine(&mut self, other: &SlotDefinition) {
        fn take<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }
        take(&mut self.description, &other.description);
        take(&mut self.title, &other.title);
        take(&mut self.alias, &other.alias);
        take(&mut self.range, &other.range);
        take(&mut self.required, &other.required);
        take(&mut self.identifier, &other.identifier);
        take(&mut self.key, &other.key);
        take(&mut self.multivalued, &other.multivalued);
        take(&mut self.minimum_cardinality, &other.minimum_cardinality);
        take(&mut self.unit, &other.unit);
        for (name, value) in other.annotations.iter() {
            self.annotations.insert(name, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_keeps_declaration_order() {
        let yaml = "zeta: {}\nalpha: {}\nmid: {}\n";
        let map: OrderedMap<ClassDefinition> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ordered_map_null_values() {
        let yaml = "ACTIVE:\nDECEASED:\n  description: No longer living\n";
        let map: OrderedMap<PermissibleValueDefinition> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.get("ACTIVE").unwrap().description.is_none());
        assert_eq!(
            map.get("DECEASED").unwrap().description.as_deref(),
            Some("No longer living")
        );
    }

    #[test]
    fn test_ordered_map_numeric_keys() {
        let yaml = "1: {description: One}\n2:\n";
        let map: OrderedMap<PermissibleValueDefinition> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_unit_code_alias() {
        let slot: SlotDefinition = serde_yaml::from_str("unit:\n  code: kg\n").unwrap();
        assert_eq!(slot.unit.unwrap().ucum_code.as_deref(), Some("kg"));
    }

    #[test]
    fn test_refine_overlays_only_set_fields() {
        let mut base: SlotDefinition =
            serde_yaml::from_str("description: Age\nrange: integer\n").unwrap();
        let usage: SlotDefinition = serde_yaml::from_str("required: true\n").unwrap();
        base.refine(&usage);
        assert_eq!(base.description.as_deref(), Some("Age"));
        assert_eq!(base.range.as_deref(), Some("integer"));
        assert_eq!(base.required, Some(true));
    }
}
