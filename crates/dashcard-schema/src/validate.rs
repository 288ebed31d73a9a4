//! Editor-time card validation
//!
//! Checks a card's config against its schema and collects human-readable
//! problems. Validation is advisory: it never blocks saving or
//! rendering, and the renderer still makes a best-effort pass over
//! invalid cards.

use serde_json::Value;

use dashcard_model::{Card, CardKind};

use crate::field::{FieldSpec, FieldType};
use crate::registry::SchemaRegistry;

/// Outcome of validating one card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Collected problems, in field declaration order
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no problems were found
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of problems found
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the report is empty (no problems)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a card against the registry's schema for its kind
///
/// An unknown kind yields a single error and no per-field checks; the
/// card still renders as a placeholder.
#[must_use]
pub fn validate(registry: &SchemaRegistry, card: &Card) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let CardKind::Unknown(tag) = &card.kind {
        report.errors.push(format!("Unknown card type: {tag}"));
        return report;
    }

    let Some(schema) = registry.get(&card.kind) else {
        report
            .errors
            .push(format!("Unknown card type: {}", card.kind));
        return report;
    };

    for (name, spec) in &schema.fields {
        check_field(card, name, spec, &mut report.errors);
    }

    report
}

fn check_field(card: &Card, name: &str, spec: &FieldSpec, errors: &mut Vec<String>) {
    // Action and cards fields live in typed slots, not the config bag.
    let present = match spec.field_type {
        FieldType::Action => action_slot(card, name).is_some(),
        FieldType::CardsPicker => card.children.is_some(),
        _ => card
            .config
            .get(name)
            .is_some_and(|v| !is_absent_value(v)),
    };

    if !present {
        if spec.required {
            errors.push(format!("field '{name}' is required"));
        }
        return;
    }

    let value = match spec.field_type {
        FieldType::Action | FieldType::CardsPicker => return,
        _ => &card.config[name],
    };

    match spec.field_type {
        FieldType::Number => {
            if !value.is_number() {
                errors.push(format!("field '{name}' must be a number"));
            } else if let Some(n) = value.as_f64() {
                if let Some(min) = spec.min {
                    if n < min {
                        errors.push(format!("field '{name}' must be at least {min}"));
                    }
                }
                if let Some(max) = spec.max {
                    if n > max {
                        errors.push(format!("field '{name}' must be at most {max}"));
                    }
                }
            }
        }
        FieldType::String | FieldType::Textarea => {
            if !value.is_string() {
                errors.push(format!("field '{name}' must be a string"));
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                errors.push(format!("field '{name}' must be a boolean"));
            }
        }
        FieldType::Select => match value.as_str() {
            Some(chosen) if !spec.options.is_empty() => {
                if !spec.options.iter().any(|o| o.value == chosen) {
                    let allowed: Vec<_> =
                        spec.options.iter().map(|o| o.value.as_str()).collect();
                    errors.push(format!(
                        "field '{name}' must be one of: {}",
                        allowed.join(", ")
                    ));
                }
            }
            Some(_) => {}
            None => errors.push(format!("field '{name}' must be a string")),
        },
        FieldType::EntityPicker => {
            if !value.is_string() {
                errors.push(format!("field '{name}' must be an entity id"));
            }
        }
        FieldType::EntitiesPicker => {
            if !value.is_array() {
                errors.push(format!("field '{name}' must be a list of entities"));
            }
        }
        FieldType::Object => {
            if !value.is_object() {
                errors.push(format!("field '{name}' must be a mapping"));
            }
        }
        FieldType::Action | FieldType::CardsPicker => {}
    }
}

fn action_slot<'a>(card: &'a Card, name: &str) -> Option<&'a dashcard_model::Action> {
    match name {
        "tap_action" => card.actions.tap.as_ref(),
        "hold_action" => card.actions.hold.as_ref(),
        "double_tap_action" => card.actions.double_tap.as_ref(),
        _ => None,
    }
}

// Absent for required-field purposes: missing key, null, or empty string.
fn is_absent_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
