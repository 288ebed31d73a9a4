//! Cards - one visual unit of a dashboard
//!
//! A card pairs a kind tag from a closed set with two field bags: the
//! schema-declared `config` and the `raw_unknown` passthrough. The split
//! keeps round-trip fidelity explicit: anything the schema does not
//! declare survives parse and serialize untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::CardActions;
use crate::entity::EntityId;
use crate::ids::CardId;

/// The closed set of card kinds
///
/// Dispatch over cards is an exhaustive `match` on this enum; adding a
/// kind means adding a schema entry and a renderer arm, and the compiler
/// points at every site that needs one. Unrecognized tags ride along in
/// [`CardKind::Unknown`] instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardKind {
    /// List of entity states
    Entities,
    /// Single clickable button
    Button,
    /// Numeric gauge with severity bands
    Gauge,
    /// Solar production / consumption / grid flow
    Solar,
    /// Battery level with charge and discharge flows
    Battery,
    /// Markdown text block
    Markdown,
    /// Container: children stacked top to bottom
    VerticalStack,
    /// Container: children in a single row
    HorizontalStack,
    /// Container: children in an N-column grid
    Grid,
    /// Passthrough for tags this build does not recognize
    Unknown(String),
}

impl CardKind {
    /// All known kinds, in schema-registry order
    #[must_use]
    pub fn known() -> [CardKind; 9] {
        [
            Self::Entities,
            Self::Button,
            Self::Gauge,
            Self::Solar,
            Self::Battery,
            Self::Markdown,
            Self::VerticalStack,
            Self::HorizontalStack,
            Self::Grid,
        ]
    }

    /// Canonical type tag for this kind
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Entities => "entities",
            Self::Button => "button",
            Self::Gauge => "gauge",
            Self::Solar => "solar",
            Self::Battery => "battery",
            Self::Markdown => "markdown",
            Self::VerticalStack => "vertical-stack",
            Self::HorizontalStack => "horizontal-stack",
            Self::Grid => "grid",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parse a tag; unrecognized tags become [`CardKind::Unknown`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "entities" => Self::Entities,
            "button" => Self::Button,
            "gauge" => Self::Gauge,
            "solar" => Self::Solar,
            "battery" => Self::Battery,
            "markdown" => Self::Markdown,
            "vertical-stack" => Self::VerticalStack,
            "horizontal-stack" => Self::HorizontalStack,
            "grid" => Self::Grid,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this kind holds nested child cards
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Grid | Self::VerticalStack | Self::HorizontalStack)
    }

    /// Whether the tag was recognized
    #[inline]
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for CardKind {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<CardKind> for String {
    fn from(kind: CardKind) -> Self {
        kind.as_tag().to_string()
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// One visual unit of a dashboard
///
/// `config` holds only fields declared by the kind's schema. Action
/// slots and nested children are lifted out of the raw mapping into
/// typed fields; everything else lands in `raw_unknown`.
///
/// Equality compares content (kind, config, actions, children,
/// raw_unknown) and deliberately ignores `id`: card ids are
/// editor-session identity, not part of the persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Session-local identity
    pub id: CardId,
    /// Which kind of card this is
    pub kind: CardKind,
    /// Schema-declared fields
    pub config: IndexMap<String, Value>,
    /// Tap / hold / double-tap actions
    pub actions: CardActions,
    /// Nested cards for container kinds; `None` when the source document
    /// had no `cards` key at all
    pub children: Option<Vec<Card>>,
    /// Fields absent from the schema, preserved verbatim
    pub raw_unknown: IndexMap<String, Value>,
}

impl Card {
    /// Create an empty card of the given kind with a fresh id
    #[must_use]
    pub fn new(kind: CardKind) -> Self {
        Self {
            id: CardId::new(),
            kind,
            config: IndexMap::new(),
            actions: CardActions::default(),
            children: None,
            raw_unknown: IndexMap::new(),
        }
    }

    /// With a config field set
    #[inline]
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// With child cards
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<Card>) -> Self {
        self.children = Some(children);
        self
    }

    /// String-valued config field
    #[inline]
    #[must_use]
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    /// Numeric config field
    ///
    /// Numeric strings are accepted, matching how loosely typed source
    /// documents spell numbers.
    #[must_use]
    pub fn config_f64(&self, key: &str) -> Option<f64> {
        match self.config.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean config field
    #[inline]
    #[must_use]
    pub fn config_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(Value::as_bool)
    }

    /// Card title, where the schema declares one
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.config_str("title")
    }

    /// Card icon, where the schema declares one
    #[inline]
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.config_str("icon")
    }

    /// Primary entity reference for single-entity kinds
    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        self.config_str("entity").map(EntityId::from)
    }

    /// Entity reference stored under an arbitrary config key
    /// (`solar_entity`, `state_entity`, ...)
    #[must_use]
    pub fn entity_field(&self, key: &str) -> Option<EntityId> {
        self.config_str(key).map(EntityId::from)
    }

    /// Child cards; empty for non-containers and for containers whose
    /// source omitted `cards`
    #[inline]
    #[must_use]
    pub fn child_cards(&self) -> &[Card] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Total number of cards in this subtree, this card included
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .child_cards()
            .iter()
            .map(Card::subtree_len)
            .sum::<usize>()
    }
}

// Identity is session-local; two cards with the same content are the
// same card for round-trip purposes.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.config == other.config
            && self.actions == other.actions
            && self.children == other.children
            && self.raw_unknown == other.raw_unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_tag_round_trip() {
        for kind in CardKind::known() {
            assert_eq!(CardKind::from_tag(kind.as_tag()), kind);
        }
    }

    #[test]
    fn unknown_kind_keeps_tag() {
        let kind = CardKind::from_tag("custom:fancy-card");
        assert_eq!(kind, CardKind::Unknown("custom:fancy-card".to_string()));
        assert_eq!(kind.as_tag(), "custom:fancy-card");
        assert!(!kind.is_known());
    }

    #[test]
    fn containers_are_containers() {
        assert!(CardKind::Grid.is_container());
        assert!(CardKind::VerticalStack.is_container());
        assert!(CardKind::HorizontalStack.is_container());
        assert!(!CardKind::Gauge.is_container());
    }

    #[test]
    fn config_accessors_coerce_numbers() {
        let card = Card::new(CardKind::Gauge)
            .with_config("min", json!(0))
            .with_config("max", json!("100"))
            .with_config("title", json!("Power"));

        assert_eq!(card.config_f64("min"), Some(0.0));
        assert_eq!(card.config_f64("max"), Some(100.0));
        assert_eq!(card.title(), Some("Power"));
        assert_eq!(card.config_f64("missing"), None);
    }

    #[test]
    fn equality_ignores_id() {
        let a = Card::new(CardKind::Button).with_config("title", json!("Go"));
        let b = Card::new(CardKind::Button).with_config("title", json!("Go"));
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn subtree_len_counts_nested() {
        let grid = Card::new(CardKind::Grid).with_children(vec![
            Card::new(CardKind::Gauge),
            Card::new(CardKind::VerticalStack)
                .with_children(vec![Card::new(CardKind::Markdown)]),
        ]);
        assert_eq!(grid.subtree_len(), 4);
    }
}
