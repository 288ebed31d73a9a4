//! Round-trip tests: parse -> serialize -> parse must be lossless for
//! recognized fields and for anything captured in the passthrough bags.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

use dashcard_config::{parse_json, parse_yaml, to_json, to_yaml};
use dashcard_model::CardKind;

const FULL_DASHBOARD: &str = r#"
title: Home
views:
  - id: view-main
    title: Main
    path: /main
    icon: mdi:home
    cards:
      - type: entities
        title: Living Room
        entities:
          - light.lamp
          - entity: sensor.temp
            name: Temperature
        show_header_toggle: false
        tap_action:
          action: toggle
          target: light.lamp
      - type: gauge
        title: Power
        entity: sensor.power
        min: 0
        max: 5000
        unit: W
        severity:
          green: 1000
          yellow: 3000
          red: 5000
      - type: grid
        columns: 2
        cards:
          - type: button
            title: All Off
            tap_action:
              action: call-service
              service: light.turn_off
              service_data:
                entity_id: all
          - type: markdown
            content: '# Notes'
  - id: view-energy
    title: Energy
    cards:
      - type: solar
        solar_entity: sensor.solar_power
        consumption_entity: sensor.house_power
        grid_entity: sensor.grid_power
      - type: battery
        state_entity: sensor.battery_level
        power_entity: sensor.battery_power
        show_percentage: true
"#;

#[test]
fn yaml_round_trip_is_lossless() {
    let first = parse_yaml(FULL_DASHBOARD).unwrap();
    let yaml = to_yaml(&first).unwrap();
    let second = parse_yaml(&yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_round_trip_is_lossless() {
    let first = parse_yaml(FULL_DASHBOARD).unwrap();
    let json = to_json(&first).unwrap();
    let second = parse_json(&json).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_field_survives_round_trip() {
    let source = r"
views:
  - id: v1
    cards:
      - type: gauge
        entity: sensor.power
        custom_annotation:
          origin: legacy-editor
          revision: 7
";
    let dashboard = parse_yaml(source).unwrap();
    let card = &dashboard.views[0].cards[0];
    assert_eq!(
        card.raw_unknown.get("custom_annotation"),
        Some(&json!({ "origin": "legacy-editor", "revision": 7 }))
    );

    let reparsed = parse_yaml(&to_yaml(&dashboard).unwrap()).unwrap();
    assert_eq!(
        reparsed.views[0].cards[0].raw_unknown.get("custom_annotation"),
        Some(&json!({ "origin": "legacy-editor", "revision": 7 }))
    );
}

#[test]
fn unknown_card_type_survives_round_trip() {
    let source = r"
views:
  - id: v1
    cards:
      - type: custom:sparkline
        entity: sensor.power
        hours: 24
";
    let dashboard = parse_yaml(source).unwrap();
    let reparsed = parse_yaml(&to_yaml(&dashboard).unwrap()).unwrap();

    let card = &reparsed.views[0].cards[0];
    assert_eq!(card.kind, CardKind::Unknown("custom:sparkline".to_string()));
    assert_eq!(card.raw_unknown.get("entity"), Some(&json!("sensor.power")));
    assert_eq!(card.raw_unknown.get("hours"), Some(&json!(24)));
}

#[test]
fn action_extra_keys_survive_round_trip() {
    let source = r"
views:
  - id: v1
    cards:
      - type: button
        title: Sprinkler
        tap_action:
          action: call-service
          service: switch.turn_on
          confirmation: true
";
    let dashboard = parse_yaml(source).unwrap();
    let reparsed = parse_yaml(&to_yaml(&dashboard).unwrap()).unwrap();
    let tap = reparsed.views[0].cards[0].actions.tap.as_ref().unwrap();
    assert_eq!(tap.extra.get("confirmation"), Some(&json!(true)));
}

proptest! {
    // Arbitrary scalar configs round-trip through JSON untouched.
    #[test]
    fn prop_scalar_config_round_trips(
        title in "[a-zA-Z0-9 ]{0,24}",
        max in 1i64..100_000,
        flag in any::<bool>(),
        extra in 0i64..1_000_000,
    ) {
        let doc = json!({
            "views": [{
                "id": "v1",
                "cards": [{
                    "type": "gauge",
                    "title": title,
                    "entity": "sensor.power",
                    "max": max,
                    "passthrough_marker": extra,
                    "show_header": flag,
                }],
            }],
        });

        let first = parse_json(&doc.to_string()).unwrap();
        let second = parse_json(&to_json(&first).unwrap()).unwrap();
        prop_assert_eq!(&first, &second);

        let card = &second.views[0].cards[0];
        prop_assert_eq!(card.raw_unknown.get("passthrough_marker"), Some(&json!(extra)));
    }

    // Nested unknown structures survive a YAML round trip.
    #[test]
    fn prop_unknown_values_round_trip_yaml(
        note in "[a-z_ ]{1,24}",
        num in 0i64..10_000,
    ) {
        let doc = json!({
            "views": [{
                "id": "v1",
                "cards": [{
                    "type": "markdown",
                    "content": "hello",
                    "annotations": { "note": note, "revision": num },
                }],
            }],
        });

        let first = parse_json(&doc.to_string()).unwrap();
        let second = parse_yaml(&to_yaml(&first).unwrap()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            &second.views[0].cards[0].raw_unknown["annotations"]["revision"],
            &json!(num)
        );
    }
}
