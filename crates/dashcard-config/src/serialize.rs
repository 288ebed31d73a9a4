//! Dashboard document serialization
//!
//! The inverse of parsing: typed model out to YAML/JSON. Export is
//! lossless for recognized fields plus everything captured in the
//! passthrough bags.

use serde_json::{Map, Value};

use dashcard_model::{Action, Card, Dashboard, View};

use crate::error::SerializeError;

/// Serialize a dashboard to YAML text
///
/// # Errors
/// Returns [`SerializeError`] if YAML emission fails.
pub fn to_yaml(dashboard: &Dashboard) -> Result<String, SerializeError> {
    Ok(serde_yaml::to_string(&dashboard_to_value(dashboard))?)
}

/// Serialize a dashboard to pretty-printed JSON text
///
/// # Errors
/// Returns [`SerializeError`] if JSON emission fails.
pub fn to_json(dashboard: &Dashboard) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(&dashboard_to_value(
        dashboard,
    ))?)
}

/// Encode a dashboard as a document value
#[must_use]
pub fn dashboard_to_value(dashboard: &Dashboard) -> Value {
    let mut map = Map::new();
    if let Some(title) = &dashboard.title {
        map.insert("title".to_string(), Value::String(title.clone()));
    }
    map.insert(
        "views".to_string(),
        Value::Array(dashboard.views.iter().map(view_to_value).collect()),
    );
    Value::Object(map)
}

/// Encode a single card as a document value
#[must_use]
pub fn card_to_value(card: &Card) -> Value {
    let mut map = Map::new();

    // Cards that arrived without a type tag keep not having one.
    let tag = card.kind.as_tag();
    if !tag.is_empty() {
        map.insert("type".to_string(), Value::String(tag.to_string()));
    }

    for (key, value) in &card.config {
        map.insert(key.clone(), value.clone());
    }

    if let Some(action) = &card.actions.tap {
        map.insert("tap_action".to_string(), action_to_value(action));
    }
    if let Some(action) = &card.actions.hold {
        map.insert("hold_action".to_string(), action_to_value(action));
    }
    if let Some(action) = &card.actions.double_tap {
        map.insert("double_tap_action".to_string(), action_to_value(action));
    }

    if let Some(children) = &card.children {
        map.insert(
            "cards".to_string(),
            Value::Array(children.iter().map(card_to_value).collect()),
        );
    }

    for (key, value) in &card.raw_unknown {
        map.insert(key.clone(), value.clone());
    }

    Value::Object(map)
}

fn view_to_value(view: &View) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::String(view.id.as_str().to_string()));
    if let Some(title) = &view.title {
        map.insert("title".to_string(), Value::String(title.clone()));
    }
    if let Some(path) = &view.path {
        map.insert("path".to_string(), Value::String(path.clone()));
    }
    if let Some(icon) = &view.icon {
        map.insert("icon".to_string(), Value::String(icon.clone()));
    }
    map.insert(
        "cards".to_string(),
        Value::Array(view.cards.iter().map(card_to_value).collect()),
    );
    Value::Object(map)
}

fn action_to_value(action: &Action) -> Value {
    let mut map = Map::new();
    map.insert(
        "action".to_string(),
        Value::String(action.kind.as_tag().to_string()),
    );
    if let Some(target) = &action.target {
        map.insert(
            "target".to_string(),
            Value::String(target.as_str().to_string()),
        );
    }
    if let Some(navigate_to) = &action.navigate_to {
        map.insert(
            "navigate_to".to_string(),
            Value::String(navigate_to.clone()),
        );
    }
    if let Some(service) = &action.service {
        map.insert("service".to_string(), Value::String(service.clone()));
    }
    if !action.service_data.is_empty() {
        map.insert(
            "service_data".to_string(),
            Value::Object(
                action
                    .service_data
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
        );
    }
    if let Some(ms) = action.debounce_ms {
        map.insert("debounce".to_string(), Value::Number(ms.into()));
    }
    for (key, value) in &action.extra {
        map.insert(key.clone(), value.clone());
    }
    Value::Object(map)
}
