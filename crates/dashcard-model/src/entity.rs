//! Entities - externally-owned data points
//!
//! An entity is a named value in the home-automation backend (a sensor,
//! a switch, a light). The engine only ever reads entities through the
//! store boundary and refers to them by [`EntityId`]; an entity may
//! disappear or be renamed independent of any card referencing it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Namespaced entity identifier, e.g. `sensor.living_room_temp`
///
/// The segment before the first `.` is the domain ("sensor", "light",
/// "switch", ...) and drives toggle semantics in the action executor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Wrap an id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain prefix of the id (`light.kitchen` -> `light`)
    ///
    /// Returns `None` when the id has no `.` separator.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        let (domain, rest) = self.0.split_once('.')?;
        if domain.is_empty() || rest.is_empty() {
            return None;
        }
        Some(domain)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Snapshot of an entity's current state and attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Namespaced identifier
    pub id: EntityId,
    /// Current scalar state (string, number or boolean)
    pub state: Value,
    /// Attribute bag (friendly_name, unit_of_measurement, icon, ...)
    pub attributes: IndexMap<String, Value>,
    /// Timestamp of the last state change
    pub last_changed: DateTime<Utc>,
    /// Whether the backend currently reports the entity as reachable
    pub available: bool,
}

impl Entity {
    /// Create an entity with the given state and no attributes
    #[must_use]
    pub fn new(id: impl Into<EntityId>, state: Value) -> Self {
        Self {
            id: id.into(),
            state,
            attributes: IndexMap::new(),
            last_changed: Utc::now(),
            available: true,
        }
    }

    /// With an attribute set
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// With availability flag
    #[inline]
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Human-readable name, if the backend provided one
    #[inline]
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    /// Unit of measurement attribute, if present
    #[inline]
    #[must_use]
    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.attributes
            .get("unit_of_measurement")
            .and_then(Value::as_str)
    }

    /// Icon attribute, if present
    #[inline]
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.attributes.get("icon").and_then(Value::as_str)
    }

    /// Current state interpreted as a number, if it is one
    ///
    /// Numeric strings are accepted since backends frequently report
    /// sensor readings as strings.
    #[must_use]
    pub fn numeric_state(&self) -> Option<f64> {
        match &self.state {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Update the state in place, refreshing `last_changed`
    pub fn update_state(&mut self, new_state: Value) {
        self.state = new_state;
        self.last_changed = Utc::now();
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.state)
    }
}
