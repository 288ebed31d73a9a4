//! Field declarations
//!
//! A [`FieldSpec`] describes one configurable card field: its value
//! type, default, whether it is required, and hints for form-generating
//! editors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Free-form single-line text
    String,
    /// Numeric value
    Number,
    /// True/false flag
    Boolean,
    /// One of a fixed option list
    Select,
    /// Multi-line text
    Textarea,
    /// A single entity id
    EntityPicker,
    /// A list of entity references
    EntitiesPicker,
    /// An interaction descriptor (tap/hold/double-tap)
    Action,
    /// Nested child cards
    CardsPicker,
    /// Opaque nested mapping
    Object,
}

/// One entry of a select field's option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create an option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declaration of a single configurable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Value type
    pub field_type: FieldType,
    /// Display label for editors
    pub label: String,
    /// Default populated into freshly created cards
    pub default: Option<Value>,
    /// Whether the validator flags an absent value
    pub required: bool,
    /// Short editor hint
    pub hint: Option<String>,
    /// Options for [`FieldType::Select`] fields
    pub options: Vec<SelectOption>,
    /// Lower bound for numeric fields
    pub min: Option<f64>,
    /// Upper bound for numeric fields
    pub max: Option<f64>,
}

impl FieldSpec {
    /// Create a field spec of the given type
    #[must_use]
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            default: None,
            required: false,
            hint: None,
            options: Vec::new(),
            min: None,
            max: None,
        }
    }

    /// Shorthand for a string field
    #[inline]
    #[must_use]
    pub fn string(label: impl Into<String>) -> Self {
        Self::new(FieldType::String, label)
    }

    /// Shorthand for a number field
    #[inline]
    #[must_use]
    pub fn number(label: impl Into<String>) -> Self {
        Self::new(FieldType::Number, label)
    }

    /// Shorthand for a boolean field
    #[inline]
    #[must_use]
    pub fn boolean(label: impl Into<String>) -> Self {
        Self::new(FieldType::Boolean, label)
    }

    /// Shorthand for an entity picker
    #[inline]
    #[must_use]
    pub fn entity(label: impl Into<String>) -> Self {
        Self::new(FieldType::EntityPicker, label)
    }

    /// With a default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark the field required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// With an editor hint
    #[inline]
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// With select options
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        self.options = options
            .into_iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        self
    }

    /// With numeric bounds
    #[inline]
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// The theme select shared by several card kinds
    #[must_use]
    pub(crate) fn theme() -> Self {
        Self::new(FieldType::Select, "Theme")
            .with_default(Value::String("default".to_string()))
            .with_options([
                ("default", "Default"),
                ("light", "Light"),
                ("dark", "Dark"),
            ])
    }
}
