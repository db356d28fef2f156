//! Validation of form values against a layout.
//!
//! Each field is checked against its rules in a fixed order and the first
//! failing rule produces that field's message:
//!
//! 1. required: the value must not be `""` or null
//! 2. max length: text must not exceed the field's `max_chars`
//! 3. format: number fields must hold a finite number, date fields a
//!    `YYYY-MM-DD` calendar date
//! 4. membership: dropdown and radio values must be one of the choices
//!
//! Missing values skip every rule except the first. Validation never fails:
//! the result is a complete error map that replaces the previous one.

use chrono::NaiveDate;

use layoutform_core::Settings;

use crate::coercion::parse_number;
use crate::fields::{codes, FieldDescriptor, InputKind};
use crate::layout::Layout;
use crate::value::{FieldErrors, Value, Values};
use crate::visibility::is_visible;

/// The date format date fields hold.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates every field in `layout` and returns the error map.
///
/// Hidden fields are validated too unless `settings.validate_hidden_fields`
/// is `false`.
///
/// # Examples
///
/// ```
/// use layoutform_core::Settings;
/// use layoutform_engine::fields::{FieldDescriptor, InputKind};
/// use layoutform_engine::layout::Layout;
/// use layoutform_engine::validation::validate;
/// use layoutform_engine::value::{Value, Values};
///
/// let layout = Layout::new(vec![FieldDescriptor::new("name", InputKind::Text).required(true)]).unwrap();
/// let mut values = Values::new();
/// values.insert("name".into(), Value::from(""));
///
/// let errors = validate(&values, &layout, &Settings::default());
/// assert_eq!(errors["name"], "Field is required");
/// ```
pub fn validate(values: &Values, layout: &Layout, settings: &Settings) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in layout {
        if !settings.validate_hidden_fields && !is_visible(field, values) {
            continue;
        }
        let value = values.get(&field.id).unwrap_or(&Value::Null);
        if let Err(message) = validate_field(field, value, settings) {
            errors.insert(field.id.clone(), message);
        }
    }

    if !errors.is_empty() {
        tracing::debug!(invalid = errors.len(), "validation failed");
    }
    errors
}

/// Validates a single field value.
///
/// # Errors
///
/// Returns the message of the first rule `value` fails.
pub fn validate_field(
    field: &FieldDescriptor,
    value: &Value,
    settings: &Settings,
) -> Result<(), String> {
    if value.is_missing() {
        if field.required {
            return Err(field.message_for(codes::REQUIRED, || settings.required_message.clone()));
        }
        return Ok(());
    }

    let Some(text) = value.as_str() else {
        return Ok(());
    };

    if let Some(max) = field.max_chars {
        if text.chars().count() > max {
            return Err(field.message_for(codes::MAX_CHARS, || settings.max_chars_message_for(max)));
        }
    }

    match field.input_kind {
        InputKind::Number if parse_number(text).is_none() => Err(field
            .message_for(codes::INVALID_NUMBER, || settings.invalid_number_message.clone())),
        InputKind::Date if !is_date(text) => Err(field
            .message_for(codes::INVALID_DATE, || settings.invalid_date_message.clone())),
        InputKind::Dropdown | InputKind::Radio if field.find_choice(text).is_none() => {
            Err(field.message_for(codes::INVALID_CHOICE, || {
                settings.invalid_choice_message_for(text)
            }))
        }
        _ => Ok(()),
    }
}

/// Returns `true` if `text` is a real calendar date written exactly as
/// zero-padded `YYYY-MM-DD`.
pub fn is_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .is_ok_and(|date| date.format(DATE_FORMAT).to_string() == text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(field: FieldDescriptor, value: impl Into<Value>) -> FieldErrors {
        let id = field.id.clone();
        let layout = Layout::new(vec![field]).unwrap();
        let values = Values::from([(id, value.into())]);
        validate(&values, &layout, &Settings::default())
    }

    #[test]
    fn test_required_empty_string() {
        let errors = single(FieldDescriptor::new("name", InputKind::Text).required(true), "");
        assert_eq!(errors["name"], "Field is required");
    }

    #[test]
    fn test_required_null() {
        let errors = single(
            FieldDescriptor::new("name", InputKind::Text).required(true),
            Value::Null,
        );
        assert_eq!(errors["name"], "Field is required");
    }

    #[test]
    fn test_required_present() {
        let errors = single(FieldDescriptor::new("name", InputKind::Text).required(true), "x");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_false_boolean_is_present() {
        let errors = single(
            FieldDescriptor::new("active", InputKind::Boolean).required(true),
            false,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_zero_is_present() {
        let errors = single(FieldDescriptor::new("n", InputKind::Number).required(true), 0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_empty_skips_format_rules() {
        assert!(single(FieldDescriptor::new("n", InputKind::Number), "").is_empty());
        assert!(single(FieldDescriptor::new("d", InputKind::Date), "").is_empty());
        assert!(single(FieldDescriptor::new("n", InputKind::Number), Value::Null).is_empty());
    }

    #[test]
    fn test_missing_key_treated_as_null() {
        let layout = Layout::new(vec![FieldDescriptor::new("a", InputKind::Text).required(true)])
            .unwrap();
        let errors = validate(&Values::new(), &layout, &Settings::default());
        assert_eq!(errors["a"], "Field is required");
    }

    #[test]
    fn test_number_format() {
        let field = || FieldDescriptor::new("n", InputKind::Number);
        assert!(single(field(), "42").is_empty());
        assert!(single(field(), " -1.5 ").is_empty());
        assert_eq!(single(field(), "abc")["n"], "Enter a number");
        assert_eq!(single(field(), "1.").len(), 0);
        assert_eq!(single(field(), "-")["n"], "Enter a number");
        assert_eq!(single(field(), "inf")["n"], "Enter a number");
    }

    #[test]
    fn test_date_format() {
        let field = || FieldDescriptor::new("d", InputKind::Date);
        assert!(single(field(), "2024-02-29").is_empty());
        assert!(single(field(), "2023-02-29").contains_key("d"));
        assert!(single(field(), "29/02/2024").contains_key("d"));
    }

    #[test]
    fn test_date_must_be_zero_padded() {
        let field = || FieldDescriptor::new("d", InputKind::Date);
        for text in ["2024-1-5", " 2024-01-05", "+2024-01-05", "2024-01-05 "] {
            assert_eq!(
                single(field(), text)["d"],
                "Enter a valid date (YYYY-MM-DD)",
                "{text:?} should be rejected"
            );
        }
        assert!(single(field(), "2024-01-05").is_empty());
    }

    #[test]
    fn test_max_chars() {
        let errors = single(FieldDescriptor::new("t", InputKind::Text).max_chars(3), "abcd");
        assert_eq!(errors["t"], "Ensure this value has at most 3 characters");
        assert!(single(FieldDescriptor::new("t", InputKind::Text).max_chars(3), "äöü").is_empty());
    }

    #[test]
    fn test_choice_membership() {
        let field = || {
            FieldDescriptor::new("c", InputKind::Dropdown)
                .choice("red", "Red")
                .choice("blue", "Blue")
        };
        assert!(single(field(), "red").is_empty());
        assert!(single(field(), "green")["c"].contains("green"));
    }

    #[test]
    fn test_required_rule_wins() {
        let field = FieldDescriptor::new("c", InputKind::Radio)
            .choice("a", "A")
            .required(true);
        assert_eq!(single(field, "")["c"], "Field is required");
    }

    #[test]
    fn test_custom_messages() {
        let field = FieldDescriptor::new("n", InputKind::Number)
            .required(true)
            .error_message(codes::REQUIRED, "How many?")
            .error_message(codes::INVALID_NUMBER, "Digits only");
        assert_eq!(single(field.clone(), "")["n"], "How many?");
        assert_eq!(single(field, "x")["n"], "Digits only");
    }

    #[test]
    fn test_settings_message_override() {
        let layout = Layout::new(vec![FieldDescriptor::new("a", InputKind::Text).required(true)])
            .unwrap();
        let settings = Settings {
            required_message: "Required".to_string(),
            ..Settings::default()
        };
        let values = Values::from([("a".to_string(), Value::from(""))]);
        assert_eq!(validate(&values, &layout, &settings)["a"], "Required");
    }

    #[test]
    fn test_hidden_fields_validated_by_default() {
        let layout = Layout::new(vec![
            FieldDescriptor::new("skip", InputKind::Boolean),
            FieldDescriptor::new("detail", InputKind::Text)
                .required(true)
                .hide_when("skip", [true]),
        ])
        .unwrap();
        let values = Values::from([
            ("skip".to_string(), Value::Bool(true)),
            ("detail".to_string(), Value::from("")),
        ]);

        assert!(validate(&values, &layout, &Settings::default()).contains_key("detail"));

        let lenient = Settings {
            validate_hidden_fields: false,
            ..Settings::default()
        };
        assert!(validate(&values, &layout, &lenient).is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let layout = Layout::new(vec![FieldDescriptor::new("a", InputKind::Text).required(true)])
            .unwrap();
        let values = Values::from([("a".to_string(), Value::from(""))]);
        let settings = Settings::default();
        assert_eq!(
            validate(&values, &layout, &settings),
            validate(&values, &layout, &settings)
        );
    }
}
