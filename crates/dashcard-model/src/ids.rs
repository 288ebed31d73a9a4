//! Identifier newtypes
//!
//! Editor-assigned identities for cards and views. Card ids are
//! session-local (never persisted); view ids round-trip through the
//! dashboard document and must stay unique within a dashboard.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique card identifier (ULID for sortability)
///
/// Assigned when a card is created by the editor or materialized by the
/// parser. Identity is session-local: it is not part of the persisted
/// document and is excluded from card equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub Ulid);

impl CardId {
    /// Generate new card ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique view identifier
///
/// Views carry their id in the persisted document, so this is a string
/// newtype rather than a generated-only id: imported documents keep
/// whatever ids they declared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for an editor-created view
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("view-{}", Ulid::new()))
    }

    /// Get the id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ViewId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ViewId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_ids_unique() {
        let a = CardId::new();
        let b = CardId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn view_id_round_trips_string() {
        let id = ViewId::new("view-main");
        assert_eq!(id.as_str(), "view-main");
        assert_eq!(id.to_string(), "view-main");
    }

    #[test]
    fn generated_view_ids_unique() {
        assert_ne!(ViewId::generate(), ViewId::generate());
    }
}
