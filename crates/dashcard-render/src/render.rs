//! Renderer dispatch
//!
//! Maps each card kind to its rendering routine with an exhaustive
//! match; containers recurse under a depth and visited-id guard. Value
//! problems degrade to placeholders - the only errors out of here are
//! structural (cycles, depth overflow).

use std::collections::HashSet;

use serde_json::Value;

use dashcard_model::{Card, CardId, CardKind, EntityId};
use dashcard_runtime::EntityStore;

use crate::error::RenderError;
use crate::node::{EntityRow, Layout, NodePayload, RenderedNode, SeverityBand};
use crate::resolve::{display, resolve_display, resolve_numeric, StateOverlay};

/// Default limit on container nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Grid column count when the config does not set one
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Card-to-node renderer
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    max_depth: usize,
}

impl Renderer {
    /// Create a renderer with the default depth limit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// With a nesting depth limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render one card (and its subtree) to a node tree
    ///
    /// # Errors
    /// Returns [`RenderError`] only for cyclic containment or depth
    /// overflow; every other problem renders as a placeholder.
    pub fn render(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> Result<RenderedNode, RenderError> {
        let mut visited = HashSet::new();
        self.render_card(card, store, overlay, &mut visited, 0)
    }

    fn render_card(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
        visited: &mut HashSet<CardId>,
        depth: usize,
    ) -> Result<RenderedNode, RenderError> {
        if depth >= self.max_depth {
            return Err(RenderError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        // Ownership is a tree; a repeated id on one path means the
        // document wired containers into a cycle.
        if !visited.insert(card.id) {
            return Err(RenderError::CycleDetected { card_id: card.id });
        }

        let (payload, children) = match &card.kind {
            CardKind::Entities => (self.render_entities(card, store, overlay), Vec::new()),
            CardKind::Button => (self.render_button(card, store, overlay), Vec::new()),
            CardKind::Gauge => (self.render_gauge(card, store, overlay), Vec::new()),
            CardKind::Solar => (self.render_solar(card, store, overlay), Vec::new()),
            CardKind::Battery => (self.render_battery(card, store, overlay), Vec::new()),
            CardKind::Markdown => (
                NodePayload::Markdown {
                    content: card.config_str("content").unwrap_or_default().to_string(),
                },
                Vec::new(),
            ),
            CardKind::Grid => {
                let columns = card
                    .config_f64("columns")
                    .map_or(DEFAULT_GRID_COLUMNS, |c| (c as usize).max(1));
                let children =
                    self.render_children(card, store, overlay, visited, depth)?;
                (
                    NodePayload::Container {
                        layout: Layout::Grid { columns },
                    },
                    children,
                )
            }
            CardKind::VerticalStack => {
                let children =
                    self.render_children(card, store, overlay, visited, depth)?;
                (
                    NodePayload::Container {
                        layout: Layout::Column,
                    },
                    children,
                )
            }
            CardKind::HorizontalStack => {
                let children =
                    self.render_children(card, store, overlay, visited, depth)?;
                (
                    NodePayload::Container {
                        layout: Layout::Row,
                    },
                    children,
                )
            }
            CardKind::Unknown(tag) => {
                tracing::debug!(tag = %tag, "rendering unknown card type placeholder");
                (
                    NodePayload::Unknown {
                        type_tag: tag.clone(),
                    },
                    Vec::new(),
                )
            }
        };

        visited.remove(&card.id);

        Ok(RenderedNode {
            kind: card.kind.clone(),
            title: card.title().map(ToString::to_string),
            icon: card.icon().map(ToString::to_string),
            payload,
            children,
        })
    }

    fn render_children(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
        visited: &mut HashSet<CardId>,
        depth: usize,
    ) -> Result<Vec<RenderedNode>, RenderError> {
        card.child_cards()
            .iter()
            .map(|child| self.render_card(child, store, overlay, visited, depth + 1))
            .collect()
    }

    fn render_entities(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> NodePayload {
        let items = card
            .config
            .get("entities")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut rows = Vec::with_capacity(items.len());
        for item in &items {
            let (id, name_override) = match item {
                Value::String(s) => (Some(EntityId::from(s.as_str())), None),
                Value::Object(map) => {
                    let id = ["entity", "entity_id", "id"]
                        .iter()
                        .find_map(|key| map.get(*key))
                        .and_then(Value::as_str)
                        .map(EntityId::from);
                    let name = map.get("name").and_then(Value::as_str).map(ToString::to_string);
                    (id, name)
                }
                _ => (None, None),
            };

            let Some(id) = id else {
                tracing::warn!("skipping entities item without an entity id");
                continue;
            };

            let row = match store.get(&id) {
                Some(entity) => {
                    let state = overlay
                        .get(&id)
                        .map_or_else(|| display(&entity.state), display);
                    EntityRow {
                        label: name_override
                            .or_else(|| entity.friendly_name().map(ToString::to_string))
                            .unwrap_or_else(|| id.to_string()),
                        state,
                        unit: entity.unit_of_measurement().map(ToString::to_string),
                        entity_id: Some(id),
                        missing: false,
                    }
                }
                None => EntityRow::not_found(id),
            };
            rows.push(row);
        }

        NodePayload::EntityList { rows }
    }

    fn render_button(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> NodePayload {
        let entity_id = card.entity();
        let entity = entity_id.as_ref().and_then(|id| store.get(id));

        let label = card
            .title()
            .map(ToString::to_string)
            .or_else(|| {
                entity
                    .as_ref()
                    .and_then(|e| e.friendly_name().map(ToString::to_string))
            })
            .or_else(|| entity_id.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "—".to_string());

        let state = entity_id
            .as_ref()
            .map(|id| resolve_display(Some(id), store, overlay));

        NodePayload::Button {
            label,
            entity_id,
            state,
            tap_kind: card.actions.tap_or_default().kind,
        }
    }

    fn render_gauge(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> NodePayload {
        let min = card.config_f64("min").unwrap_or(0.0);
        let max = card.config_f64("max").unwrap_or(100.0);
        let raw = resolve_numeric(card.entity().as_ref(), store, overlay);

        // Clamp into [min, max]; a degenerate range pins to min.
        let (value, percentage) = if max > min {
            let value = raw.clamp(min, max);
            (value, (value - min) / (max - min) * 100.0)
        } else {
            (min, 0.0)
        };

        let severity = card.config.get("severity").and_then(Value::as_object);
        let threshold = |key: &str, fallback: f64| {
            severity
                .and_then(|map| map.get(key))
                .and_then(Value::as_f64)
                .unwrap_or(fallback)
        };
        let green = threshold("green", max * 0.5);
        let yellow = threshold("yellow", max * 0.75);

        let band = if value < green {
            SeverityBand::Green
        } else if value < yellow {
            SeverityBand::Yellow
        } else {
            SeverityBand::Red
        };

        NodePayload::Gauge {
            value,
            percentage,
            band,
            min,
            max,
            unit: card.config_str("unit").map(ToString::to_string),
            gauge_type: card
                .config_str("gauge_type")
                .unwrap_or("semicircle")
                .to_string(),
        }
    }

    fn render_solar(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> NodePayload {
        NodePayload::Solar {
            solar_w: resolve_numeric(card.entity_field("solar_entity").as_ref(), store, overlay),
            consumption_w: resolve_numeric(
                card.entity_field("consumption_entity").as_ref(),
                store,
                overlay,
            ),
            grid_w: resolve_numeric(card.entity_field("grid_entity").as_ref(), store, overlay),
        }
    }

    fn render_battery(
        &self,
        card: &Card,
        store: &dyn EntityStore,
        overlay: &StateOverlay,
    ) -> NodePayload {
        let level = resolve_numeric(card.entity_field("state_entity").as_ref(), store, overlay)
            .clamp(0.0, 100.0);

        // A combined signed power entity takes precedence: positive is
        // charging, negative is discharging.
        let (charging_w, discharging_w) = match card.entity_field("power_entity") {
            Some(power_id) => {
                let power = resolve_numeric(Some(&power_id), store, overlay);
                if power >= 0.0 {
                    (power, 0.0)
                } else {
                    (0.0, -power)
                }
            }
            None => (
                resolve_numeric(card.entity_field("charging_entity").as_ref(), store, overlay),
                resolve_numeric(
                    card.entity_field("discharging_entity").as_ref(),
                    store,
                    overlay,
                ),
            ),
        };

        NodePayload::Battery {
            level_pct: level,
            charging_w,
            discharging_w,
            show_percentage: card.config_bool("show_percentage").unwrap_or(true),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
