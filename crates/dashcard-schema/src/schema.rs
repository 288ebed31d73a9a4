//! Card schemas
//!
//! A [`Schema`] is the full static declaration of one card kind's
//! configurable surface.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::{FieldSpec, FieldType};

/// Static declaration of a card kind's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Display label ("Gauge", "Vertical Stack", ...)
    pub label: String,
    /// One-line description for card pickers
    pub description: String,
    /// Icon shown in card pickers
    pub icon: String,
    /// Declared fields, in form order
    pub fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    /// Create a schema with no fields
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            icon: icon.into(),
            fields: IndexMap::new(),
        }
    }

    /// With a field declared
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Look up a field declaration
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Whether the schema declares the field
    #[inline]
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of fields declared as entity references
    pub fn entity_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, spec)| {
                matches!(
                    spec.field_type,
                    FieldType::EntityPicker | FieldType::EntitiesPicker
                )
            })
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_preserved() {
        let schema = Schema::new("Test", "test schema", "x")
            .field("title", FieldSpec::string("Title"))
            .field("entity", FieldSpec::entity("Entity"))
            .field("max", FieldSpec::number("Max"));

        let names: Vec<_> = schema.fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["title", "entity", "max"]);
    }

    #[test]
    fn entity_fields_filtered() {
        let schema = Schema::new("Test", "test schema", "x")
            .field("title", FieldSpec::string("Title"))
            .field("entity", FieldSpec::entity("Entity"))
            .field(
                "entities",
                FieldSpec::new(FieldType::EntitiesPicker, "Entities"),
            );

        let names: Vec<_> = schema.entity_fields().collect();
        assert_eq!(names, ["entity", "entities"]);
    }
}
