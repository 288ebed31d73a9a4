//! View rendering sessions
//!
//! [`render_view`] renders every card in a view and subscribes to each
//! referenced entity so the shell hears about changes. The returned
//! [`RenderSession`] owns those subscriptions; dropping it on view
//! teardown releases them all, so no callback outlives the view.

use std::sync::Arc;

use serde_json::Value;

use dashcard_model::{Card, EntityId, View};
use dashcard_runtime::{EntityStore, StateCallback, Subscription};
use dashcard_schema::{registry, FieldType};

use crate::error::RenderError;
use crate::node::RenderedNode;
use crate::render::Renderer;
use crate::resolve::StateOverlay;

/// A rendered view plus the live subscriptions keeping it current
///
/// Scoped acquire/release: subscriptions are registered while
/// rendering and released when the session drops.
#[derive(Debug)]
pub struct RenderSession {
    nodes: Vec<RenderedNode>,
    subscriptions: Vec<Subscription>,
}

impl RenderSession {
    /// Rendered nodes, one per top-level card, in view order
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    /// Number of entity subscriptions this session holds
    #[inline]
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

/// Render a whole view and subscribe to its referenced entities
///
/// `on_change` is invoked for every state change of an entity any card
/// in the view references, until the session is dropped.
///
/// # Errors
/// Returns [`RenderError`] for cyclic containment or depth overflow in
/// any card of the view.
pub fn render_view(
    renderer: &Renderer,
    view: &View,
    store: &dyn EntityStore,
    overlay: &StateOverlay,
    on_change: StateCallback,
) -> Result<RenderSession, RenderError> {
    let nodes = view
        .cards
        .iter()
        .map(|card| renderer.render(card, store, overlay))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ids: Vec<EntityId> = Vec::new();
    for card in &view.cards {
        for id in referenced_entities(card) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    tracing::debug!(
        cards = view.cards.len(),
        entities = ids.len(),
        "view rendered"
    );

    let subscriptions = ids
        .iter()
        .map(|id| store.subscribe(id, Arc::clone(&on_change)))
        .collect();

    Ok(RenderSession {
        nodes,
        subscriptions,
    })
}

/// Every entity id a card (and its subtree) references
///
/// Walks the schema's entity-typed fields, the action targets, and
/// container children. Order is first-seen; duplicates are kept for the
/// caller to fold.
#[must_use]
pub fn referenced_entities(card: &Card) -> Vec<EntityId> {
    let mut ids = Vec::new();
    collect_entities(card, &mut ids);
    ids
}

fn collect_entities(card: &Card, ids: &mut Vec<EntityId>) {
    if let Some(schema) = registry().get(&card.kind) {
        for (name, spec) in &schema.fields {
            match spec.field_type {
                FieldType::EntityPicker => {
                    if let Some(id) = card.entity_field(name) {
                        ids.push(id);
                    }
                }
                FieldType::EntitiesPicker => {
                    if let Some(items) = card.config.get(name).and_then(Value::as_array) {
                        for item in items {
                            if let Some(id) = entities_item_id(item) {
                                ids.push(id);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    for action in [&card.actions.tap, &card.actions.hold, &card.actions.double_tap]
        .into_iter()
        .flatten()
    {
        if let Some(target) = &action.target {
            ids.push(target.clone());
        }
    }

    for child in card.child_cards() {
        collect_entities(child, ids);
    }
}

fn entities_item_id(item: &Value) -> Option<EntityId> {
    match item {
        Value::String(s) => Some(EntityId::from(s.as_str())),
        Value::Object(map) => ["entity", "entity_id", "id"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(Value::as_str)
            .map(EntityId::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashcard_model::{Action, CardKind};
    use serde_json::json;

    #[test]
    fn collects_entity_fields_and_action_targets() {
        let mut card = Card::new(CardKind::Button).with_config("entity", json!("light.lamp"));
        card.actions.hold = Some(Action::toggle().with_target("switch.fan"));

        let ids = referenced_entities(&card);
        assert_eq!(
            ids,
            vec![EntityId::from("light.lamp"), EntityId::from("switch.fan")]
        );
    }

    #[test]
    fn collects_entities_list_items() {
        let card = Card::new(CardKind::Entities).with_config(
            "entities",
            json!(["sensor.a", { "entity": "sensor.b", "name": "B" }, 42]),
        );

        let ids = referenced_entities(&card);
        assert_eq!(ids, vec![EntityId::from("sensor.a"), EntityId::from("sensor.b")]);
    }

    #[test]
    fn recurses_into_container_children() {
        let grid = Card::new(CardKind::Grid).with_children(vec![
            Card::new(CardKind::Gauge).with_config("entity", json!("sensor.power")),
            Card::new(CardKind::Solar)
                .with_config("solar_entity", json!("sensor.solar"))
                .with_config("consumption_entity", json!("sensor.house"))
                .with_config("grid_entity", json!("sensor.grid")),
        ]);

        let ids = referenced_entities(&grid);
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&EntityId::from("sensor.solar")));
    }
}
