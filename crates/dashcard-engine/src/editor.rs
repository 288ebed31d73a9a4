//! Editor operations
//!
//! The mutation surface a dashboard editor drives: card creation with
//! schema defaults, the validator-checked field setter, and view/card
//! arrangement that maintains the unique-view-id invariant.
//!
//! Operations work on plain model values; persistence of the edited
//! dashboard is the embedder's concern.

use serde_json::Value;

use dashcard_config::{parse_action, ConfigParser};
use dashcard_model::{Card, CardId, CardKind, Dashboard, View, ViewId};
use dashcard_schema::{registry, validate, FieldType, ValidationReport};

use crate::error::EngineError;

/// Dashboard editing operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Editor;

impl Editor {
    /// Create an editor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create a card of the given kind with schema defaults populated
    ///
    /// The card gets a fresh id; every declared field with a default
    /// lands in the matching slot (config bag, action slot, or an empty
    /// child list for containers).
    #[must_use]
    pub fn new_card(&self, kind: CardKind) -> Card {
        let mut card = Card::new(kind);
        let Some(schema) = registry().get(&card.kind) else {
            return card;
        };

        for (name, spec) in &schema.fields {
            let Some(default) = &spec.default else {
                continue;
            };
            match spec.field_type {
                FieldType::Action => {
                    if let Some(action) = parse_action(default) {
                        set_action_slot(&mut card, name, Some(action));
                    }
                }
                FieldType::CardsPicker => {
                    card.children = Some(Vec::new());
                }
                _ => {
                    card.config.insert(name.clone(), default.clone());
                }
            }
        }
        card
    }

    /// Set one field through the validator-checked path
    ///
    /// Declared fields go to their typed slot; undeclared names land in
    /// the passthrough bag; a null value clears the field. The returned
    /// report is advisory - the mutation is applied either way, and
    /// invalid cards still render best-effort.
    pub fn set_field(&self, card: &mut Card, name: &str, value: Value) -> ValidationReport {
        let field_type = registry()
            .get(&card.kind)
            .and_then(|schema| schema.get(name))
            .map(|spec| spec.field_type);

        match field_type {
            Some(FieldType::Action) => {
                if value.is_null() {
                    set_action_slot(card, name, None);
                } else if let Some(action) = parse_action(&value) {
                    set_action_slot(card, name, Some(action));
                } else {
                    // Not a mapping: keep the raw value so nothing is
                    // lost; validation will flag it.
                    card.config.insert(name.to_string(), value);
                }
            }
            Some(FieldType::CardsPicker) => {
                if value.is_null() {
                    card.children = None;
                } else if let Value::Array(items) = &value {
                    let parser = ConfigParser::new();
                    let children = items
                        .iter()
                        .filter_map(|item| parser.parse_card_value(item).ok())
                        .collect();
                    card.children = Some(children);
                } else {
                    card.config.insert(name.to_string(), value);
                }
            }
            Some(_) => {
                if value.is_null() {
                    card.config.shift_remove(name);
                } else {
                    card.config.insert(name.to_string(), value);
                }
            }
            None => {
                if value.is_null() {
                    card.raw_unknown.shift_remove(name);
                } else {
                    card.raw_unknown.insert(name.to_string(), value);
                }
            }
        }

        validate(registry(), card)
    }

    /// Add a view, enforcing the unique-view-id invariant
    ///
    /// # Errors
    /// Returns [`EngineError::DuplicateViewId`] when the dashboard
    /// already has a view with this id.
    pub fn add_view(&self, dashboard: &mut Dashboard, view: View) -> Result<(), EngineError> {
        if dashboard.view(&view.id).is_some() {
            return Err(EngineError::DuplicateViewId(view.id));
        }
        dashboard.views.push(view);
        Ok(())
    }

    /// Remove a view; its cards are destroyed with it
    ///
    /// # Errors
    /// Returns [`EngineError::ViewNotFound`] when no view has this id.
    pub fn remove_view(
        &self,
        dashboard: &mut Dashboard,
        id: &ViewId,
    ) -> Result<View, EngineError> {
        let index = dashboard
            .views
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| EngineError::ViewNotFound(id.clone()))?;
        Ok(dashboard.views.remove(index))
    }

    /// Move a view between positions in the navigation order
    ///
    /// # Errors
    /// Returns [`EngineError::IndexOutOfBounds`] when either position
    /// is outside the dashboard.
    pub fn move_view(
        &self,
        dashboard: &mut Dashboard,
        from: usize,
        to: usize,
    ) -> Result<(), EngineError> {
        let len = dashboard.views.len();
        if from >= len || to >= len {
            return Err(EngineError::IndexOutOfBounds {
                index: from.max(to),
                len,
            });
        }
        let view = dashboard.views.remove(from);
        dashboard.views.insert(to, view);
        Ok(())
    }

    /// Append a card to a view
    pub fn add_card(&self, view: &mut View, card: Card) {
        view.cards.push(card);
    }

    /// Insert a card at a position
    ///
    /// # Errors
    /// Returns [`EngineError::IndexOutOfBounds`] when `index` is past
    /// the end.
    pub fn insert_card(
        &self,
        view: &mut View,
        index: usize,
        card: Card,
    ) -> Result<(), EngineError> {
        if index > view.cards.len() {
            return Err(EngineError::IndexOutOfBounds {
                index,
                len: view.cards.len(),
            });
        }
        view.cards.insert(index, card);
        Ok(())
    }

    /// Remove a card by id, searching nested containers too
    pub fn remove_card(&self, view: &mut View, id: CardId) -> Option<Card> {
        remove_from(&mut view.cards, id)
    }

    /// Move a card between positions in a view
    ///
    /// # Errors
    /// Returns [`EngineError::IndexOutOfBounds`] when either position
    /// is outside the view.
    pub fn move_card(&self, view: &mut View, from: usize, to: usize) -> Result<(), EngineError> {
        let len = view.cards.len();
        if from >= len || to >= len {
            return Err(EngineError::IndexOutOfBounds {
                index: from.max(to),
                len,
            });
        }
        let card = view.cards.remove(from);
        view.cards.insert(to, card);
        Ok(())
    }
}

fn set_action_slot(card: &mut Card, name: &str, action: Option<dashcard_model::Action>) {
    match name {
        "tap_action" => card.actions.tap = action,
        "hold_action" => card.actions.hold = action,
        "double_tap_action" => card.actions.double_tap = action,
        _ => {}
    }
}

fn remove_from(cards: &mut Vec<Card>, id: CardId) -> Option<Card> {
    if let Some(index) = cards.iter().position(|c| c.id == id) {
        return Some(cards.remove(index));
    }
    for card in cards.iter_mut() {
        if let Some(children) = &mut card.children {
            if let Some(found) = remove_from(children, id) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashcard_model::ActionKind;
    use serde_json::json;

    #[test]
    fn new_card_populates_schema_defaults() {
        let editor = Editor::new();
        let card = editor.new_card(CardKind::Gauge);

        assert_eq!(card.config.get("min"), Some(&json!(0)));
        assert_eq!(card.config.get("max"), Some(&json!(100)));
        assert_eq!(card.config_str("gauge_type"), Some("semicircle"));
    }

    #[test]
    fn new_button_gets_default_tap_action() {
        let editor = Editor::new();
        let card = editor.new_card(CardKind::Button);

        assert_eq!(card.config_str("title"), Some("Click me"));
        let tap = card.actions.tap.expect("default tap action");
        assert_eq!(tap.kind, ActionKind::Toggle);
    }

    #[test]
    fn new_container_starts_with_empty_children() {
        let editor = Editor::new();
        let card = editor.new_card(CardKind::Grid);
        assert_eq!(card.children, Some(Vec::new()));
        assert_eq!(card.config.get("columns"), Some(&json!(3)));
    }

    #[test]
    fn new_unknown_card_is_bare() {
        let editor = Editor::new();
        let card = editor.new_card(CardKind::Unknown("mystery".to_string()));
        assert!(card.config.is_empty());
        assert!(card.children.is_none());
    }

    #[test]
    fn set_field_reports_validation() {
        let editor = Editor::new();
        let mut card = editor.new_card(CardKind::Gauge);

        // Still missing its required entity.
        let report = editor.set_field(&mut card, "min", json!(10));
        assert!(!report.is_valid());

        let report = editor.set_field(&mut card, "entity", json!("sensor.power"));
        assert!(report.is_valid());
    }

    #[test]
    fn set_field_routes_undeclared_names_to_raw_unknown() {
        let editor = Editor::new();
        let mut card = editor.new_card(CardKind::Markdown);

        editor.set_field(&mut card, "my_extension", json!({ "x": 1 }));
        assert_eq!(card.raw_unknown.get("my_extension"), Some(&json!({ "x": 1 })));
        assert!(!card.config.contains_key("my_extension"));
    }

    #[test]
    fn set_field_null_clears() {
        let editor = Editor::new();
        let mut card = editor.new_card(CardKind::Gauge);
        editor.set_field(&mut card, "entity", json!("sensor.power"));

        editor.set_field(&mut card, "entity", Value::Null);
        assert!(!card.config.contains_key("entity"));
    }

    #[test]
    fn set_action_field_builds_typed_action() {
        let editor = Editor::new();
        let mut card = editor.new_card(CardKind::Button);

        editor.set_field(
            &mut card,
            "tap_action",
            json!({ "action": "navigate", "navigate_to": "/energy" }),
        );
        let tap = card.actions.tap.as_ref().unwrap();
        assert_eq!(tap.kind, ActionKind::Navigate);
        assert_eq!(tap.navigate_to.as_deref(), Some("/energy"));
    }

    #[test]
    fn duplicate_view_id_rejected() {
        let editor = Editor::new();
        let mut dashboard = Dashboard::new();

        editor
            .add_view(&mut dashboard, View::new("A").with_id("v1"))
            .unwrap();
        let result = editor.add_view(&mut dashboard, View::new("B").with_id("v1"));
        assert_eq!(
            result,
            Err(EngineError::DuplicateViewId(ViewId::from("v1")))
        );
    }

    #[test]
    fn remove_view_destroys_cards() {
        let editor = Editor::new();
        let mut dashboard = Dashboard::new();
        editor
            .add_view(
                &mut dashboard,
                View::new("A")
                    .with_id("v1")
                    .with_card(editor.new_card(CardKind::Markdown)),
            )
            .unwrap();

        let removed = editor.remove_view(&mut dashboard, &ViewId::from("v1")).unwrap();
        assert_eq!(removed.cards.len(), 1);
        assert!(dashboard.views.is_empty());
    }

    #[test]
    fn remove_card_searches_containers() {
        let editor = Editor::new();
        let leaf = editor.new_card(CardKind::Markdown);
        let leaf_id = leaf.id;

        let mut view = View::new("A").with_card(
            Card::new(CardKind::VerticalStack).with_children(vec![leaf]),
        );

        let removed = editor.remove_card(&mut view, leaf_id).unwrap();
        assert_eq!(removed.id, leaf_id);
        assert!(view.cards[0].child_cards().is_empty());
    }

    #[test]
    fn move_view_reorders_navigation() {
        let editor = Editor::new();
        let mut dashboard = Dashboard::new();
        editor
            .add_view(&mut dashboard, View::new("A").with_id("a"))
            .unwrap();
        editor
            .add_view(&mut dashboard, View::new("B").with_id("b"))
            .unwrap();

        editor.move_view(&mut dashboard, 1, 0).unwrap();
        assert_eq!(dashboard.views[0].id, ViewId::from("b"));
        assert!(dashboard.view_ids_unique());
    }

    #[test]
    fn move_card_reorders() {
        let editor = Editor::new();
        let a = editor.new_card(CardKind::Markdown);
        let b = editor.new_card(CardKind::Button);
        let (a_id, b_id) = (a.id, b.id);

        let mut view = View::new("A").with_card(a).with_card(b);
        editor.move_card(&mut view, 1, 0).unwrap();
        assert_eq!(view.cards[0].id, b_id);
        assert_eq!(view.cards[1].id, a_id);

        let result = editor.move_card(&mut view, 0, 5);
        assert!(matches!(result, Err(EngineError::IndexOutOfBounds { .. })));
    }
}
