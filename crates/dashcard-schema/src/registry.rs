//! Schema registry
//!
//! Maps each known [`CardKind`] to its [`Schema`]. Built once, treated
//! as immutable process-wide state; [`registry()`] returns the shared
//! instance, while [`SchemaRegistry::with_defaults`] builds a private
//! one for tests.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::json;

use dashcard_model::CardKind;

use crate::field::{FieldSpec, FieldType};
use crate::schema::Schema;

/// Registry of card schemas keyed by kind
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<CardKind, Schema>,
}

impl SchemaRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Create registry with the built-in card schemas
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CardKind::Entities, entities_schema());
        registry.register(CardKind::Button, button_schema());
        registry.register(CardKind::Gauge, gauge_schema());
        registry.register(CardKind::Solar, solar_schema());
        registry.register(CardKind::Battery, battery_schema());
        registry.register(CardKind::Markdown, markdown_schema());
        registry.register(CardKind::VerticalStack, stack_schema("Vertical Stack"));
        registry.register(CardKind::HorizontalStack, stack_schema("Horizontal Stack"));
        registry.register(CardKind::Grid, grid_schema());
        registry
    }

    /// Register a schema for a kind
    pub fn register(&mut self, kind: CardKind, schema: Schema) {
        self.schemas.insert(kind, schema);
    }

    /// Look up the schema for a kind
    ///
    /// Returns `None` for [`CardKind::Unknown`] and for kinds that were
    /// never registered.
    #[inline]
    #[must_use]
    pub fn get(&self, kind: &CardKind) -> Option<&Schema> {
        self.schemas.get(kind)
    }

    /// Whether a schema exists for the kind
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: &CardKind) -> bool {
        self.schemas.contains_key(kind)
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &CardKind> {
        self.schemas.keys()
    }

    /// Number of registered schemas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

static REGISTRY: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::with_defaults);

/// The process-wide schema registry
#[inline]
#[must_use]
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}

fn entities_schema() -> Schema {
    Schema::new(
        "Entities",
        "Display one or more entity states with customizable appearance and actions",
        "format-list-bulleted",
    )
    .field(
        "title",
        FieldSpec::string("Title").with_hint("Optional header text"),
    )
    .field(
        "entities",
        FieldSpec::new(FieldType::EntitiesPicker, "Entities")
            .with_default(json!([]))
            .required()
            .with_hint("Select entities to display"),
    )
    .field(
        "show_header_toggle",
        FieldSpec::boolean("Show header toggle")
            .with_default(json!(true))
            .with_hint("Toggle all entities on/off from header"),
    )
    .field(
        "show_entity_picture",
        FieldSpec::boolean("Show entity picture").with_default(json!(false)),
    )
    .field("theme", FieldSpec::theme())
    .field("tap_action", FieldSpec::new(FieldType::Action, "On tap"))
    .field("hold_action", FieldSpec::new(FieldType::Action, "On hold"))
    .field(
        "double_tap_action",
        FieldSpec::new(FieldType::Action, "On double tap"),
    )
}

fn button_schema() -> Schema {
    Schema::new("Button", "Clickable button with customizable actions", "gesture-tap-button")
        .field(
            "title",
            FieldSpec::string("Button title")
                .with_default(json!("Click me"))
                .required(),
        )
        .field(
            "icon",
            FieldSpec::string("Icon")
                .with_default(json!("mdi:button-outline"))
                .with_hint("Material Design Icons (mdi:*)"),
        )
        .field("entity", FieldSpec::entity("Entity"))
        .field(
            "tap_action",
            FieldSpec::new(FieldType::Action, "On tap")
                .with_default(json!({ "action": "toggle" }))
                .required(),
        )
        .field("hold_action", FieldSpec::new(FieldType::Action, "On hold"))
        .field(
            "double_tap_action",
            FieldSpec::new(FieldType::Action, "On double tap"),
        )
        .field(
            "color",
            FieldSpec::new(FieldType::Select, "Color")
                .with_default(json!("primary"))
                .with_options([
                    ("primary", "Primary"),
                    ("success", "Success"),
                    ("warning", "Warning"),
                    ("danger", "Danger"),
                ]),
        )
        .field(
            "state_color",
            FieldSpec::boolean("Color by state").with_default(json!(false)),
        )
}

fn gauge_schema() -> Schema {
    Schema::new("Gauge", "Visual gauge displaying numeric entity values", "gauge")
        .field("title", FieldSpec::string("Title"))
        .field(
            "entity",
            FieldSpec::entity("Entity")
                .required()
                .with_hint("Select a numeric entity"),
        )
        .field(
            "gauge_type",
            FieldSpec::new(FieldType::Select, "Gauge Type")
                .with_default(json!("semicircle"))
                .with_options([
                    ("semicircle", "Semicircle"),
                    ("circle", "Circle"),
                    ("linear", "Linear"),
                ]),
        )
        .field(
            "min",
            FieldSpec::number("Minimum value").with_default(json!(0)),
        )
        .field(
            "max",
            FieldSpec::number("Maximum value").with_default(json!(100)),
        )
        .field(
            "severity",
            FieldSpec::new(FieldType::Object, "Severity levels")
                .with_hint("Value thresholds for color changes"),
        )
        .field(
            "unit",
            FieldSpec::string("Unit of measurement").with_hint("e.g., °C, %"),
        )
        .field("decimals", FieldSpec::number("Decimals"))
}

fn solar_schema() -> Schema {
    Schema::new(
        "Solar",
        "Solar energy flow diagram showing production, consumption, and grid",
        "solar-power",
    )
    .field("title", FieldSpec::string("Title"))
    .field(
        "solar_entity",
        FieldSpec::entity("Solar Production")
            .required()
            .with_hint("Entity for solar power output (W)"),
    )
    .field(
        "consumption_entity",
        FieldSpec::entity("House Consumption")
            .required()
            .with_hint("Entity for house power consumption (W)"),
    )
    .field(
        "grid_entity",
        FieldSpec::entity("Grid Power")
            .required()
            .with_hint("Entity for grid power (positive=export, negative=import)"),
    )
    .field("theme", FieldSpec::theme())
}

fn battery_schema() -> Schema {
    Schema::new(
        "Battery",
        "Display battery level with charging/discharging inputs",
        "battery-high",
    )
    .field("title", FieldSpec::string("Title"))
    .field(
        "state_entity",
        FieldSpec::entity("Battery level")
            .required()
            .with_hint("Entity reporting the battery percentage (0-100)"),
    )
    .field(
        "charging_entity",
        FieldSpec::entity("Charging").with_hint("Entity for charging power (W)"),
    )
    .field(
        "discharging_entity",
        FieldSpec::entity("Discharging").with_hint("Entity for discharging power (W)"),
    )
    .field(
        "power_entity",
        FieldSpec::entity("Combined charge/discharge power").with_hint(
            "Entity with positive charging and negative discharging power (W); takes precedence when set",
        ),
    )
    .field(
        "show_percentage",
        FieldSpec::boolean("Show Percentage").with_default(json!(true)),
    )
    .field("theme", FieldSpec::theme())
}

fn markdown_schema() -> Schema {
    Schema::new("Markdown", "Display markdown content", "language-markdown")
        .field("title", FieldSpec::string("Title"))
        .field(
            "content",
            FieldSpec::new(FieldType::Textarea, "Content")
                .with_default(json!("# Hello\n\nEdit this markdown..."))
                .required()
                .with_hint("Supports markdown"),
        )
}

fn stack_schema(label: &str) -> Schema {
    let direction = if label.starts_with("Vertical") {
        "Stack cards vertically"
    } else {
        "Stack cards horizontally (in a row)"
    };
    Schema::new(label, direction, "view-sequential").field(
        "cards",
        FieldSpec::new(FieldType::CardsPicker, "Cards")
            .with_default(json!([]))
            .required()
            .with_hint("Drag cards to reorder"),
    )
}

fn grid_schema() -> Schema {
    Schema::new("Grid", "Arrange cards in a responsive grid", "grid")
        .field(
            "columns",
            FieldSpec::number("Columns")
                .with_default(json!(3))
                .with_range(1.0, 12.0),
        )
        .field(
            "square",
            FieldSpec::boolean("Square cells").with_default(json!(false)),
        )
        .field(
            "cards",
            FieldSpec::new(FieldType::CardsPicker, "Cards")
                .with_default(json!([]))
                .required(),
        )
}
