//! Testing utilities for the dashcard workspace
//!
//! Shared fixtures: a populated entity store and ready-made cards and
//! documents for exercising the pipeline.

#![allow(missing_docs)]

use std::sync::Arc;

use serde_json::json;

use dashcard_model::{Card, CardKind, Entity};
use dashcard_runtime::MemoryEntityStore;

/// A store holding the entities the sample dashboard references
pub fn sample_store() -> Arc<MemoryEntityStore> {
    let store = Arc::new(MemoryEntityStore::new());
    store.register(
        Entity::new("light.living_room", json!("on"))
            .with_attribute("friendly_name", json!("Living Room"))
            .with_attribute("icon", json!("mdi:sofa")),
    );
    store.register(
        Entity::new("switch.fan", json!("off")).with_attribute("friendly_name", json!("Fan")),
    );
    store.register(
        Entity::new("sensor.power", json!(1250))
            .with_attribute("friendly_name", json!("House Power"))
            .with_attribute("unit_of_measurement", json!("W")),
    );
    store.register(Entity::new("sensor.solar_power", json!(3400)));
    store.register(Entity::new("sensor.grid_power", json!(-900)));
    store.register(Entity::new("sensor.battery_level", json!(76)));
    store.register(Entity::new("sensor.battery_power", json!(520)));
    store.register(Entity::new("cover.garage", json!("closed")));
    store
}

/// A dashboard document exercising every known card kind
pub fn sample_dashboard_yaml() -> &'static str {
    r"
title: Test Home
views:
  - id: view-main
    title: Main
    cards:
      - type: entities
        title: Rooms
        entities:
          - light.living_room
          - switch.fan
      - type: button
        title: Fan
        entity: switch.fan
        tap_action:
          action: toggle
      - type: gauge
        title: Power
        entity: sensor.power
        min: 0
        max: 5000
        unit: W
      - type: markdown
        content: '# Notes'
  - id: view-energy
    title: Energy
    cards:
      - type: grid
        columns: 2
        cards:
          - type: solar
            solar_entity: sensor.solar_power
            consumption_entity: sensor.power
            grid_entity: sensor.grid_power
          - type: battery
            state_entity: sensor.battery_level
            power_entity: sensor.battery_power
      - type: vertical-stack
        cards:
          - type: horizontal-stack
            cards:
              - type: markdown
                content: left
              - type: markdown
                content: right
"
}

/// A gauge card bound to the sample power sensor
pub fn sample_gauge_card() -> Card {
    Card::new(CardKind::Gauge)
        .with_config("title", json!("Power"))
        .with_config("entity", json!("sensor.power"))
        .with_config("min", json!(0))
        .with_config("max", json!(5000))
}

/// A grid with a mixed set of children
pub fn sample_grid_card() -> Card {
    Card::new(CardKind::Grid)
        .with_config("columns", json!(2))
        .with_children(vec![
            sample_gauge_card(),
            Card::new(CardKind::Button).with_config("title", json!("Go")),
            Card::new(CardKind::Markdown).with_config("content", json!("note")),
        ])
}
