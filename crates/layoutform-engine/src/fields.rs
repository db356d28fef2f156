//! Field descriptors.
//!
//! Each [`FieldDescriptor`] describes a single form field: its [`InputKind`],
//! layout hints, default value, constraints, and the hide conditions that
//! make its visibility depend on other fields. Descriptors are pure data;
//! the behavior lives in the resolver, visibility, validation, and coercion
//! modules.
//!
//! Descriptors deserialize from the camelCase JSON layout shape, accepting
//! the legacy key names (`inputType`, `length`, `displayValue`, `options`).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use layoutform_core::FormError;

use crate::value::Value;

/// Number of columns in one layout row.
pub const GRID_COLUMNS: u8 = 10;

/// Error codes accepted by [`FieldDescriptor::error_message`].
pub mod codes {
    /// A required field holds `""` or null.
    pub const REQUIRED: &str = "required";
    /// A number field holds non-numeric text.
    pub const INVALID_NUMBER: &str = "invalid_number";
    /// A date field holds text that is not `YYYY-MM-DD`.
    pub const INVALID_DATE: &str = "invalid_date";
    /// Text is longer than the field's `max_chars`.
    pub const MAX_CHARS: &str = "max_chars";
    /// A dropdown or radio value is not one of the field's choices.
    pub const INVALID_CHOICE: &str = "invalid_choice";
}

/// The closed set of input kinds a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// A checkbox holding `true`/`false`.
    Boolean,
    /// A date picker holding `YYYY-MM-DD` text.
    Date,
    /// A single-choice dropdown.
    Dropdown,
    /// A numeric input, held as text until submission.
    Number,
    /// A single-choice radio group.
    Radio,
    /// A single-line text input.
    Text,
    /// A multi-line text input.
    Textarea,
}

impl InputKind {
    /// Every input kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Boolean,
        Self::Date,
        Self::Dropdown,
        Self::Number,
        Self::Radio,
        Self::Text,
        Self::Textarea,
    ];

    /// Returns the lowercase name used in serialized layouts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Number => "number",
            Self::Radio => "radio",
            Self::Text => "text",
            Self::Textarea => "textarea",
        }
    }

    /// The value a field of this kind holds when nothing else supplies one:
    /// `false` for booleans, the empty string for everything else.
    pub fn empty_value(self) -> Value {
        match self {
            Self::Boolean => Value::Bool(false),
            _ => Value::Text(String::new()),
        }
    }

    /// Returns `true` for kinds whose widget keeps its own displayed state,
    /// which the rendering layer must clear explicitly on reset.
    pub const fn is_uncontrolled(self) -> bool {
        matches!(self, Self::Date)
    }

    /// Returns `true` for kinds that select from a list of choices.
    pub const fn requires_choices(self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio)
    }

    /// Returns `true` for kinds whose value is edited as text.
    pub const fn is_text_like(self) -> bool {
        !matches!(self, Self::Boolean)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormError::ImproperlyConfigured(format!("unknown input kind '{s}'")))
    }
}

/// Hides a field while another field's current value is one of
/// `triggering_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideCondition {
    /// The field whose value is inspected.
    #[serde(alias = "id")]
    pub source_field_id: String,
    /// The values that hide the field.
    #[serde(alias = "values")]
    pub triggering_values: Vec<Value>,
}

impl HideCondition {
    /// Creates a new `HideCondition`.
    pub fn new<V: Into<Value>>(
        source_field_id: impl Into<String>,
        triggering_values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            source_field_id: source_field_id.into(),
            triggering_values: triggering_values.into_iter().map(Into::into).collect(),
        }
    }
}

/// One option of a dropdown or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The stored value.
    pub value: String,
    /// The text shown to the user.
    pub display: String,
}

impl Choice {
    /// Creates a new `Choice`.
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

const fn default_span() -> u8 {
    GRID_COLUMNS
}

/// Complete declarative configuration of one form field.
///
/// Every optional member has a documented absence behavior:
///
/// | Member | When absent |
/// |---|---|
/// | `default_value` | the kind's empty value (see [`InputKind::empty_value`]) |
/// | `display_label` | the field `id` is shown |
/// | `fill_line` | the field occupies exactly `span` columns |
/// | `hide_conditions` | the field is always visible |
/// | `max_chars` | the `default_max_chars` setting bounds text input |
/// | `choices` | none; required for dropdown and radio fields |
/// | `padding_left` / `padding_right` | no spacer columns |
/// | `precision` | numbers are displayed as held |
/// | `required` | the field may be left empty |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique id within the layout; the key in values, errors, and payload.
    pub id: String,
    /// The kind of input, controlling defaults, validation, and coercion.
    #[serde(alias = "inputType")]
    pub input_kind: InputKind,
    /// Number of layout columns occupied (0-10).
    #[serde(default = "default_span", alias = "length")]
    pub span: u8,
    /// Value used when no seed data supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Human-readable label.
    #[serde(default, alias = "displayValue", skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    /// Occupy the remaining row width.
    #[serde(default)]
    pub fill_line: bool,
    /// Conditions that hide this field, checked in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_conditions: Vec<HideCondition>,
    /// Upper bound on text length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
    /// Options for dropdown and radio fields.
    #[serde(default, alias = "options", skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Spacer columns before the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<u8>,
    /// Spacer columns after the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<u8>,
    /// Decimal places used when displaying a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Whether an empty value fails validation.
    #[serde(default)]
    pub required: bool,
    /// Custom error messages keyed by error code (see [`codes`]).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub error_messages: HashMap<String, String>,
}

impl FieldDescriptor {
    /// Creates a new `FieldDescriptor` spanning a full row, optional, with no
    /// default value.
    pub fn new(id: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            id: id.into(),
            input_kind,
            span: GRID_COLUMNS,
            default_value: None,
            display_label: None,
            fill_line: false,
            hide_conditions: Vec::new(),
            max_chars: None,
            choices: Vec::new(),
            padding_left: None,
            padding_right: None,
            precision: None,
            required: false,
            error_messages: HashMap::new(),
        }
    }

    /// Sets the number of columns occupied.
    #[must_use]
    pub const fn span(mut self, span: u8) -> Self {
        self.span = span;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    /// Sets whether the field fills the rest of its row.
    #[must_use]
    pub const fn fill_line(mut self, fill_line: bool) -> Self {
        self.fill_line = fill_line;
        self
    }

    /// Adds a hide condition: the field is hidden while `source`'s value is
    /// one of `values`.
    #[must_use]
    pub fn hide_when<V: Into<Value>>(
        mut self,
        source: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.hide_conditions.push(HideCondition::new(source, values));
        self
    }

    /// Sets the maximum text length.
    #[must_use]
    pub const fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Adds a choice.
    #[must_use]
    pub fn choice(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
        self.choices.push(Choice::new(value, display));
        self
    }

    /// Sets the spacer columns on either side of the field.
    #[must_use]
    pub const fn padding(mut self, left: u8, right: u8) -> Self {
        self.padding_left = Some(left);
        self.padding_right = Some(right);
        self
    }

    /// Sets the display precision for numbers.
    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Returns the label to display: `display_label` if set, otherwise `id`.
    pub fn label_text(&self) -> &str {
        self.display_label.as_deref().unwrap_or(&self.id)
    }

    /// Returns the value this field starts with when no seed data applies.
    pub fn initial_value(&self) -> Value {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.input_kind.empty_value())
    }

    /// Returns the custom message for `code`, or `fallback`.
    pub fn message_for(&self, code: &str, fallback: impl FnOnce() -> String) -> String {
        self.error_messages.get(code).cloned().unwrap_or_else(fallback)
    }

    /// Returns the choice whose stored value is `value`, if any.
    pub fn find_choice(&self, value: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_round_trip_names() {
        for kind in InputKind::ALL {
            assert_eq!(kind.as_str().parse::<InputKind>().unwrap(), kind);
        }
        assert!("checkbox".parse::<InputKind>().is_err());
    }

    #[test]
    fn test_input_kind_empty_values() {
        assert_eq!(InputKind::Boolean.empty_value(), Value::Bool(false));
        assert_eq!(InputKind::Number.empty_value(), Value::Text(String::new()));
        assert_eq!(InputKind::Date.empty_value(), Value::Text(String::new()));
    }

    #[test]
    fn test_input_kind_traits() {
        assert!(InputKind::Date.is_uncontrolled());
        assert!(!InputKind::Text.is_uncontrolled());
        assert!(InputKind::Dropdown.requires_choices());
        assert!(InputKind::Radio.requires_choices());
        assert!(!InputKind::Number.requires_choices());
        assert!(!InputKind::Boolean.is_text_like());
        assert!(InputKind::Textarea.is_text_like());
    }

    #[test]
    fn test_field_builder_chain() {
        let field = FieldDescriptor::new("color", InputKind::Dropdown)
            .span(4)
            .label("Favorite color")
            .choice("red", "Red")
            .choice("blue", "Blue")
            .default_value("red")
            .padding(1, 2)
            .required(true)
            .hide_when("kind", ["none"])
            .error_message(codes::REQUIRED, "Pick one");

        assert_eq!(field.span, 4);
        assert_eq!(field.label_text(), "Favorite color");
        assert_eq!(field.choices.len(), 2);
        assert_eq!(field.padding_left, Some(1));
        assert_eq!(field.padding_right, Some(2));
        assert!(field.required);
        assert_eq!(field.hide_conditions[0].source_field_id, "kind");
        assert_eq!(field.hide_conditions[0].triggering_values, vec![Value::from("none")]);
        assert_eq!(field.message_for(codes::REQUIRED, || "x".into()), "Pick one");
        assert_eq!(field.message_for(codes::MAX_CHARS, || "x".into()), "x");
        assert_eq!(field.find_choice("blue").map(|c| c.display.as_str()), Some("Blue"));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let field = FieldDescriptor::new("first_name", InputKind::Text);
        assert_eq!(field.label_text(), "first_name");
    }

    #[test]
    fn test_initial_value() {
        let plain = FieldDescriptor::new("a", InputKind::Boolean);
        assert_eq!(plain.initial_value(), Value::Bool(false));

        let with_default = FieldDescriptor::new("b", InputKind::Number).default_value(5);
        assert_eq!(with_default.initial_value(), Value::Number(5.0));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "age",
            "inputKind": "number",
            "span": 3,
            "defaultValue": "18",
            "displayLabel": "Age",
            "required": true,
            "precision": 0
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.input_kind, InputKind::Number);
        assert_eq!(field.span, 3);
        assert_eq!(field.default_value, Some(Value::from("18")));
        assert_eq!(field.label_text(), "Age");
        assert!(field.required);
    }

    #[test]
    fn test_deserialize_legacy_keys() {
        let json = r#"{
            "id": "contact",
            "inputType": "radio",
            "length": 5,
            "displayValue": "Contact by",
            "options": [
                {"value": "email", "display": "Email"},
                {"value": "phone", "display": "Phone"}
            ],
            "hideConditions": [{"id": "opt_out", "values": [true]}]
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.input_kind, InputKind::Radio);
        assert_eq!(field.span, 5);
        assert_eq!(field.label_text(), "Contact by");
        assert_eq!(field.choices[1], Choice::new("phone", "Phone"));
        assert_eq!(field.hide_conditions[0].source_field_id, "opt_out");
        assert_eq!(field.hide_conditions[0].triggering_values, vec![Value::Bool(true)]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"id": "notes", "inputKind": "textarea"}"#).unwrap();
        assert_eq!(field, FieldDescriptor::new("notes", InputKind::Textarea));
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let result =
            serde_json::from_str::<FieldDescriptor>(r#"{"id": "x", "inputKind": "slider"}"#);
        assert!(result.is_err());
    }
}
