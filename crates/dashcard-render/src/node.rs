//! Rendered output tree
//!
//! A [`RenderedNode`] is the logical result of rendering one card:
//! resolved values, layout intent, and child nodes for containers.
//! Painting pixels from it is the embedder's concern.

use dashcard_model::{ActionKind, CardKind, EntityId};

/// Layout policy for container nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// N-column grid
    Grid {
        /// Number of columns
        columns: usize,
    },
    /// Single column, top to bottom
    Column,
    /// Single row, left to right
    Row,
}

/// Color band of a gauge reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    /// Below the green threshold
    Green,
    /// Between green and yellow thresholds
    Yellow,
    /// At or above the yellow threshold
    Red,
}

/// One row of an entities card
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    /// The referenced entity, when the row names one
    pub entity_id: Option<EntityId>,
    /// Display label (friendly name, override, or a not-found notice)
    pub label: String,
    /// Resolved state for display
    pub state: String,
    /// Unit suffix, when the entity declares one
    pub unit: Option<String>,
    /// True when the referenced entity was not in the store
    pub missing: bool,
}

impl EntityRow {
    /// Placeholder row for an entity the store does not know
    #[must_use]
    pub fn not_found(id: EntityId) -> Self {
        Self {
            label: format!("Entity '{id}' not found"),
            entity_id: Some(id),
            state: "—".to_string(),
            unit: None,
            missing: true,
        }
    }
}

/// Kind-specific payload of a rendered node
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// Rows of an entities card
    EntityList {
        /// Resolved rows, in config order
        rows: Vec<EntityRow>,
    },
    /// A button with its effective tap behavior
    Button {
        /// Display label
        label: String,
        /// Bound entity, if any
        entity_id: Option<EntityId>,
        /// Resolved entity state for display, when an entity is bound
        state: Option<String>,
        /// Kind of the effective tap action
        tap_kind: ActionKind,
    },
    /// A gauge reading
    Gauge {
        /// Clamped value
        value: f64,
        /// Position within [min, max], as 0-100
        percentage: f64,
        /// Color band for the value
        band: SeverityBand,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Unit suffix
        unit: Option<String>,
        /// Visual style tag (semicircle, circle, linear)
        gauge_type: String,
    },
    /// Solar flow readings, in watts
    Solar {
        /// Production
        solar_w: f64,
        /// House consumption
        consumption_w: f64,
        /// Grid flow (positive = export, negative = import)
        grid_w: f64,
    },
    /// Battery level and power flows
    Battery {
        /// Charge level, clamped to 0-100
        level_pct: f64,
        /// Charging power, watts
        charging_w: f64,
        /// Discharging power, watts
        discharging_w: f64,
        /// Whether the shell should print the percentage
        show_percentage: bool,
    },
    /// Markdown source to lay out
    Markdown {
        /// Raw markdown content
        content: String,
    },
    /// Container wrapping child nodes
    Container {
        /// How children should be arranged
        layout: Layout,
    },
    /// Placeholder for a kind this build does not recognize
    Unknown {
        /// The offending type tag
        type_tag: String,
    },
}

/// The rendered form of one card
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    /// Kind of the card this node came from
    pub kind: CardKind,
    /// Card title, when configured
    pub title: Option<String>,
    /// Card icon, when configured
    pub icon: Option<String>,
    /// Kind-specific resolved payload
    pub payload: NodePayload,
    /// Child nodes, for containers
    pub children: Vec<RenderedNode>,
}

impl RenderedNode {
    /// Whether this node is the unknown-kind placeholder
    #[inline]
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self.payload, NodePayload::Unknown { .. })
    }

    /// Number of nodes in this subtree, this node included
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(RenderedNode::subtree_len)
            .sum::<usize>()
    }
}
