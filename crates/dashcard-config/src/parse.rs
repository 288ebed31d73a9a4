//! Dashboard document parsing
//!
//! Raw YAML/JSON text comes in, a typed [`Dashboard`] comes out.
//! Malformed source fails fast before any card is constructed; unknown
//! card types and undeclared fields are never errors. They ride along
//! in the passthrough bags so nothing is silently dropped.

use serde_json::{Map, Value};

use dashcard_model::{Action, ActionKind, Card, CardKind, Dashboard, EntityId, View, ViewId};
use dashcard_schema::{registry, FieldType, SchemaRegistry};

use crate::error::ParseError;

/// Default limit on container nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Caller-configurable parsing knobs
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Maximum container nesting depth before the parse is rejected
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a nesting depth limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parser for dashboard documents
///
/// Holds the schema registry used to split declared fields from
/// passthrough data. [`ConfigParser::new`] uses the shared registry;
/// tests can inject their own.
#[derive(Debug, Clone)]
pub struct ConfigParser<'a> {
    registry: &'a SchemaRegistry,
    options: ParseOptions,
}

impl ConfigParser<'static> {
    /// Create a parser over the shared schema registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: registry(),
            options: ParseOptions::default(),
        }
    }
}

impl Default for ConfigParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ConfigParser<'a> {
    /// Create a parser over a specific registry
    #[inline]
    #[must_use]
    pub fn with_registry(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            options: ParseOptions::default(),
        }
    }

    /// With parsing options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a YAML dashboard document
    ///
    /// # Errors
    /// Returns [`ParseError`] if the text is not valid YAML, the
    /// document is not dashboard-shaped, or nesting exceeds the limit.
    pub fn parse_yaml(&self, text: &str) -> Result<Dashboard, ParseError> {
        let doc: Value = serde_yaml::from_str(text)?;
        self.parse_document(&doc)
    }

    /// Parse a JSON dashboard document
    ///
    /// # Errors
    /// Returns [`ParseError`] if the text is not valid JSON, the
    /// document is not dashboard-shaped, or nesting exceeds the limit.
    pub fn parse_json(&self, text: &str) -> Result<Dashboard, ParseError> {
        let doc: Value = serde_json::from_str(text)?;
        self.parse_document(&doc)
    }

    /// Parse an already-decoded document value
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidStructure`] when the value is not a
    /// mapping or `views` is not a sequence.
    pub fn parse_document(&self, doc: &Value) -> Result<Dashboard, ParseError> {
        let Some(map) = doc.as_object() else {
            return Err(ParseError::InvalidStructure(
                "dashboard document must be a mapping".to_string(),
            ));
        };

        let mut dashboard = Dashboard::new();
        dashboard.title = string_field(map, "title");

        if let Some(views) = map.get("views") {
            let Value::Array(items) = views else {
                return Err(ParseError::InvalidStructure(
                    "'views' must be a sequence".to_string(),
                ));
            };
            for item in items {
                match item.as_object() {
                    Some(view_map) => dashboard.views.push(self.parse_view(view_map)?),
                    None => tracing::warn!("skipping non-mapping view entry"),
                }
            }
        }

        tracing::debug!(views = dashboard.views.len(), "parsed dashboard document");
        Ok(dashboard)
    }

    /// Parse a single card value (used by editors importing snippets)
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidStructure`] when the value is not a
    /// mapping, or [`ParseError::DepthExceeded`] for over-deep nesting.
    pub fn parse_card_value(&self, value: &Value) -> Result<Card, ParseError> {
        let Some(map) = value.as_object() else {
            return Err(ParseError::InvalidStructure(
                "card must be a mapping".to_string(),
            ));
        };
        self.parse_card(map, 0)
    }

    fn parse_view(&self, map: &Map<String, Value>) -> Result<View, ParseError> {
        let id = map
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(ViewId::generate, ViewId::from);

        let mut view = View {
            id,
            title: string_field(map, "title"),
            path: string_field(map, "path"),
            icon: string_field(map, "icon"),
            cards: Vec::new(),
        };

        if let Some(cards) = map.get("cards") {
            let Value::Array(items) = cards else {
                return Err(ParseError::InvalidStructure(
                    "view 'cards' must be a sequence".to_string(),
                ));
            };
            for item in items {
                match item.as_object() {
                    Some(card_map) => view.cards.push(self.parse_card(card_map, 0)?),
                    None => tracing::warn!("skipping non-mapping card entry"),
                }
            }
        }

        Ok(view)
    }

    fn parse_card(&self, map: &Map<String, Value>, depth: usize) -> Result<Card, ParseError> {
        if depth >= self.options.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.options.max_depth,
            });
        }

        // A missing type tag degrades to an unknown card with an empty
        // tag; the serializer knows not to emit one.
        let kind = match map.get("type").and_then(Value::as_str) {
            Some(tag) => CardKind::from_tag(tag),
            None => CardKind::Unknown(String::new()),
        };
        let mut card = Card::new(kind);

        let Some(schema) = self.registry.get(&card.kind) else {
            // No schema: preserve the whole mapping (minus the tag).
            for (key, value) in map {
                if key != "type" {
                    card.raw_unknown.insert(key.clone(), value.clone());
                }
            }
            return Ok(card);
        };

        for (key, value) in map {
            if key == "type" {
                continue;
            }
            match schema.get(key).map(|spec| spec.field_type) {
                Some(FieldType::Action) => match (parse_action(value), key.as_str()) {
                    (Some(action), "tap_action") => card.actions.tap = Some(action),
                    (Some(action), "hold_action") => card.actions.hold = Some(action),
                    (Some(action), "double_tap_action") => {
                        card.actions.double_tap = Some(action);
                    }
                    // Not a mapping (or an unexpected slot name): keep
                    // the raw value so it round-trips; the validator
                    // will flag it.
                    _ => {
                        card.config.insert(key.clone(), value.clone());
                    }
                },
                Some(FieldType::CardsPicker) => {
                    if let Value::Array(items) = value {
                        card.children = Some(self.parse_children(items, depth + 1)?);
                    } else {
                        card.config.insert(key.clone(), value.clone());
                    }
                }
                Some(_) => {
                    card.config.insert(key.clone(), value.clone());
                }
                None => {
                    card.raw_unknown.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(card)
    }

    fn parse_children(
        &self,
        items: &[Value],
        depth: usize,
    ) -> Result<Vec<Card>, ParseError> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match item.as_object() {
                Some(card_map) => children.push(self.parse_card(card_map, depth)?),
                None => tracing::warn!("skipping non-mapping card entry"),
            }
        }
        Ok(children)
    }
}

/// Parse YAML text with the shared registry and default options
///
/// # Errors
/// See [`ConfigParser::parse_yaml`].
pub fn parse_yaml(text: &str) -> Result<Dashboard, ParseError> {
    ConfigParser::new().parse_yaml(text)
}

/// Parse JSON text with the shared registry and default options
///
/// # Errors
/// See [`ConfigParser::parse_json`].
pub fn parse_json(text: &str) -> Result<Dashboard, ParseError> {
    ConfigParser::new().parse_json(text)
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(ToString::to_string)
}

/// Decode an action mapping into an [`Action`]
///
/// The `action` subkey picks the kind (defaulting to toggle);
/// recognized parameters become typed fields and everything else is
/// preserved in `extra`. Returns `None` when the value is not a
/// mapping.
#[must_use]
pub fn parse_action(value: &Value) -> Option<Action> {
    let map = value.as_object()?;
    let kind = map
        .get("action")
        .and_then(Value::as_str)
        .map_or(ActionKind::Toggle, ActionKind::from_tag);

    let mut action = Action::new(kind);
    for (key, val) in map {
        match key.as_str() {
            "action" => {}
            "target" => match val.as_str() {
                Some(s) => action.target = Some(EntityId::from(s)),
                None => {
                    action.extra.insert(key.clone(), val.clone());
                }
            },
            "navigate_to" => match val.as_str() {
                Some(s) => action.navigate_to = Some(s.to_string()),
                None => {
                    action.extra.insert(key.clone(), val.clone());
                }
            },
            "service" => match val.as_str() {
                Some(s) => action.service = Some(s.to_string()),
                None => {
                    action.extra.insert(key.clone(), val.clone());
                }
            },
            "service_data" => match val.as_object() {
                Some(data) => {
                    action.service_data =
                        data.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                }
                None => {
                    action.extra.insert(key.clone(), val.clone());
                }
            },
            "debounce" => match val.as_u64() {
                Some(ms) => action.debounce_ms = Some(ms),
                None => {
                    action.extra.insert(key.clone(), val.clone());
                }
            },
            _ => {
                action.extra.insert(key.clone(), val.clone());
            }
        }
    }
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_yaml_basic_dashboard() {
        let dashboard = parse_yaml(
            r"
title: Home
views:
  - id: view-main
    title: Main
    cards:
      - type: gauge
        entity: sensor.power
        max: 5000
",
        )
        .unwrap();

        assert_eq!(dashboard.title.as_deref(), Some("Home"));
        assert_eq!(dashboard.views.len(), 1);
        let card = &dashboard.views[0].cards[0];
        assert_eq!(card.kind, CardKind::Gauge);
        assert_eq!(card.config_f64("max"), Some(5000.0));
    }

    #[test]
    fn malformed_yaml_is_fatal() {
        let result = parse_yaml("views: [unclosed");
        assert!(matches!(result, Err(ParseError::InvalidYaml(_))));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let result = parse_json("{\"views\": ");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn scalar_document_rejected() {
        let result = parse_yaml("just a string");
        assert!(matches!(result, Err(ParseError::InvalidStructure(_))));
    }

    #[test]
    fn unknown_card_type_degrades() {
        let dashboard = parse_yaml(
            r"
views:
  - cards:
      - type: custom:fancy
        whatever: 42
",
        )
        .unwrap();

        let card = &dashboard.views[0].cards[0];
        assert_eq!(card.kind, CardKind::Unknown("custom:fancy".to_string()));
        assert!(card.config.is_empty());
        assert_eq!(card.raw_unknown.get("whatever"), Some(&json!(42)));
    }

    #[test]
    fn missing_type_degrades_with_empty_tag() {
        let dashboard = parse_yaml(
            r"
views:
  - cards:
      - entity: sensor.orphan
",
        )
        .unwrap();

        let card = &dashboard.views[0].cards[0];
        assert_eq!(card.kind, CardKind::Unknown(String::new()));
        assert_eq!(card.raw_unknown.get("entity"), Some(&json!("sensor.orphan")));
    }

    #[test]
    fn undeclared_fields_go_to_raw_unknown() {
        let dashboard = parse_yaml(
            r"
views:
  - cards:
      - type: gauge
        entity: sensor.power
        my_custom_flag: true
",
        )
        .unwrap();

        let card = &dashboard.views[0].cards[0];
        assert_eq!(card.config_str("entity"), Some("sensor.power"));
        assert!(!card.config.contains_key("my_custom_flag"));
        assert_eq!(card.raw_unknown.get("my_custom_flag"), Some(&json!(true)));
    }

    #[test]
    fn actions_decoded_into_slots() {
        let dashboard = parse_yaml(
            r"
views:
  - cards:
      - type: button
        title: Lamp
        tap_action:
          action: call-service
          service: light.toggle
          service_data:
            entity_id: light.lamp
        hold_action:
          action: more-info
          target: light.lamp
",
        )
        .unwrap();

        let card = &dashboard.views[0].cards[0];
        let tap = card.actions.tap.as_ref().unwrap();
        assert_eq!(tap.kind, ActionKind::CallService);
        assert_eq!(tap.service.as_deref(), Some("light.toggle"));
        assert_eq!(
            tap.service_data.get("entity_id"),
            Some(&json!("light.lamp"))
        );

        let hold = card.actions.hold.as_ref().unwrap();
        assert_eq!(hold.kind, ActionKind::MoreInfo);
        assert_eq!(hold.target, Some(EntityId::from("light.lamp")));
    }

    #[test]
    fn action_kind_defaults_to_toggle() {
        let action = parse_action(&json!({ "target": "switch.fan" })).unwrap();
        assert_eq!(action.kind, ActionKind::Toggle);
        assert_eq!(action.target, Some(EntityId::from("switch.fan")));
    }

    #[test]
    fn action_extra_keys_preserved() {
        let action = parse_action(&json!({
            "action": "navigate",
            "navigate_to": "/energy",
            "confirmation": true,
        }))
        .unwrap();
        assert_eq!(action.extra.get("confirmation"), Some(&json!(true)));
    }

    #[test]
    fn containers_parse_recursively() {
        let dashboard = parse_yaml(
            r"
views:
  - cards:
      - type: grid
        columns: 2
        cards:
          - type: gauge
            entity: sensor.a
          - type: vertical-stack
            cards:
              - type: markdown
                content: hi
",
        )
        .unwrap();

        let grid = &dashboard.views[0].cards[0];
        assert_eq!(grid.child_cards().len(), 2);
        let stack = &grid.child_cards()[1];
        assert_eq!(stack.kind, CardKind::VerticalStack);
        assert_eq!(stack.child_cards()[0].kind, CardKind::Markdown);
    }

    #[test]
    fn depth_limit_enforced() {
        let parser = ConfigParser::new().with_options(ParseOptions::new().with_max_depth(2));
        let result = parser.parse_yaml(
            r"
views:
  - cards:
      - type: vertical-stack
        cards:
          - type: vertical-stack
            cards:
              - type: markdown
                content: too deep
",
        );
        assert!(matches!(result, Err(ParseError::DepthExceeded { limit: 2 })));
    }

    #[test]
    fn view_metadata_passthrough() {
        let dashboard = parse_yaml(
            r"
views:
  - id: view-energy
    title: Energy
    path: /energy
    icon: mdi:flash
",
        )
        .unwrap();

        let view = &dashboard.views[0];
        assert_eq!(view.id.as_str(), "view-energy");
        assert_eq!(view.path.as_deref(), Some("/energy"));
        assert_eq!(view.icon.as_deref(), Some("mdi:flash"));
        assert!(view.cards.is_empty());
    }

    #[test]
    fn views_without_id_get_one() {
        let dashboard = parse_yaml("views:\n  - title: A\n  - title: B\n").unwrap();
        assert!(dashboard.view_ids_unique());
    }
}
