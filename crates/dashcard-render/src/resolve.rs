//! Entity value resolution
//!
//! Two-tier precedence: a live state overlay is checked first, then the
//! store's own entity state. Rendering never throws for a missing
//! entity - absent ids resolve to type-appropriate zero values and the
//! card paints a placeholder.

use std::collections::HashMap;

use serde_json::Value;

use dashcard_model::EntityId;
use dashcard_runtime::EntityStore;

/// Live state map consulted before the store
///
/// Shells that stream state updates push the freshest values here so a
/// re-render picks them up without waiting for the store round trip.
#[derive(Debug, Clone, Default)]
pub struct StateOverlay {
    states: HashMap<EntityId, Value>,
}

impl StateOverlay {
    /// Create an empty overlay
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the live state for an entity
    pub fn set(&mut self, id: impl Into<EntityId>, state: Value) {
        self.states.insert(id.into(), state);
    }

    /// Live state for an entity, if one was pushed
    #[inline]
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Value> {
        self.states.get(id)
    }

    /// Number of live states held
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the overlay is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(EntityId, Value)> for StateOverlay {
    fn from_iter<I: IntoIterator<Item = (EntityId, Value)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

/// Resolve an entity's current raw value: overlay first, then store
#[must_use]
pub(crate) fn resolve_value(
    id: Option<&EntityId>,
    store: &dyn EntityStore,
    overlay: &StateOverlay,
) -> Option<Value> {
    let id = id?;
    if let Some(value) = overlay.get(id) {
        return Some(value.clone());
    }
    store.get(id).map(|entity| entity.state)
}

/// Resolve to a number, with `0` for anything absent or non-numeric
#[must_use]
pub(crate) fn resolve_numeric(
    id: Option<&EntityId>,
    store: &dyn EntityStore,
    overlay: &StateOverlay,
) -> f64 {
    resolve_value(id, store, overlay)
        .and_then(|value| numeric(&value))
        .unwrap_or(0.0)
}

/// Resolve to display text, with `—` for anything absent or unprintable
#[must_use]
pub(crate) fn resolve_display(
    id: Option<&EntityId>,
    store: &dyn EntityStore,
    overlay: &StateOverlay,
) -> String {
    resolve_value(id, store, overlay).map_or_else(|| "—".to_string(), |value| display(&value))
}

pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => "—".to_string(),
    }
}
