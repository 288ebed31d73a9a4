//! Actions - what a user interaction should do
//!
//! An [`Action`] is an immutable description attached to a card as its
//! tap/hold/double-tap handler. Interpretation happens in the action
//! executor; the model only carries the data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entity::EntityId;

/// Default debounce window for repeated taps, in milliseconds
///
/// Rate limiting is the caller's responsibility; the executor itself is
/// stateless between invocations.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// The closed set of interaction kinds, plus a passthrough for tags this
/// build does not recognize
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Flip the target entity's state (on/off, open/closed)
    Toggle,
    /// Ask the shell to present entity detail; no state mutation
    MoreInfo,
    /// Ask the shell to navigate to a path or URL; no state mutation
    Navigate,
    /// Invoke an external service with a data payload
    CallService,
    /// Unrecognized kind tag, rejected at execution time
    Other(String),
}

impl ActionKind {
    /// Canonical tag for this kind
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Toggle => "toggle",
            Self::MoreInfo => "more-info",
            Self::Navigate => "navigate",
            Self::CallService => "call-service",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a tag into a kind; unknown tags become [`ActionKind::Other`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "toggle" => Self::Toggle,
            "more-info" => Self::MoreInfo,
            "navigate" => Self::Navigate,
            "call-service" => Self::CallService,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_tag().to_string()
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Interaction descriptor
///
/// Immutable once constructed for a given dispatch; editors build a new
/// value on each edit. Fields the schema does not know about are kept in
/// `extra` so a round trip through parse and serialize never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// What to do
    pub kind: ActionKind,
    /// Entity to act on (toggle, more-info)
    pub target: Option<EntityId>,
    /// Destination path or URL (navigate)
    pub navigate_to: Option<String>,
    /// Service name in `domain.service` form (call-service)
    pub service: Option<String>,
    /// Payload for the service call
    pub service_data: IndexMap<String, Value>,
    /// Per-action debounce override, milliseconds
    pub debounce_ms: Option<u64>,
    /// Unrecognized keys from the source document, preserved verbatim
    pub extra: IndexMap<String, Value>,
}

impl Action {
    /// Create an action of the given kind with no parameters
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            target: None,
            navigate_to: None,
            service: None,
            service_data: IndexMap::new(),
            debounce_ms: None,
            extra: IndexMap::new(),
        }
    }

    /// Shorthand for the default tap behavior
    #[inline]
    #[must_use]
    pub fn toggle() -> Self {
        Self::new(ActionKind::Toggle)
    }

    /// With a target entity
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: impl Into<EntityId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// With a navigation destination
    #[inline]
    #[must_use]
    pub fn with_navigate_to(mut self, path: impl Into<String>) -> Self {
        self.navigate_to = Some(path.into());
        self
    }

    /// With a service name
    #[inline]
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// With one service-data entry added
    #[inline]
    #[must_use]
    pub fn with_service_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.service_data.insert(key.into(), value);
        self
    }

    /// Effective debounce window in milliseconds
    #[inline]
    #[must_use]
    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }
}

/// The per-card action slots (tap / hold / double tap)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardActions {
    /// Single tap
    pub tap: Option<Action>,
    /// Press and hold
    pub hold: Option<Action>,
    /// Double tap
    pub double_tap: Option<Action>,
}

impl CardActions {
    /// True when no slot is populated
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tap.is_none() && self.hold.is_none() && self.double_tap.is_none()
    }

    /// Tap action, falling back to the default toggle
    #[must_use]
    pub fn tap_or_default(&self) -> Action {
        self.tap.clone().unwrap_or_else(Action::toggle)
    }
}

/// Named ready-made action, offered by editors as a quick pick
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPreset {
    /// Display label
    pub label: &'static str,
    /// The action to attach
    pub action: Action,
}

/// Common call-service presets for the editor's action picker
#[must_use]
pub fn service_presets() -> Vec<ActionPreset> {
    let call = |service: &str| Action::new(ActionKind::CallService).with_service(service);
    vec![
        ActionPreset {
            label: "Light: Turn On",
            action: call("light.turn_on"),
        },
        ActionPreset {
            label: "Light: Turn Off",
            action: call("light.turn_off"),
        },
        ActionPreset {
            label: "Light: Toggle",
            action: call("light.toggle"),
        },
        ActionPreset {
            label: "Switch: Turn On",
            action: call("switch.turn_on"),
        },
        ActionPreset {
            label: "Switch: Turn Off",
            action: call("switch.turn_off"),
        },
        ActionPreset {
            label: "Switch: Toggle",
            action: call("switch.toggle"),
        },
        ActionPreset {
            label: "Climate: Set Temperature",
            action: call("climate.set_temperature").with_service_data("temperature", json!(21)),
        },
        ActionPreset {
            label: "Automation: Trigger",
            action: call("automation.trigger"),
        },
        ActionPreset {
            label: "Scene: Activate",
            action: call("scene.turn_on"),
        },
    ]
}
