//! Type coercion for submission payloads.
//!
//! Number fields hold text while the user edits them, so that partial input
//! such as `"-"` or `"1."` survives. At submission their text is converted
//! to [`Value::Number`]. Every other kind passes through unchanged.
//!
//! | Number field holds | Payload value |
//! |---|---|
//! | `"42"`, `" 4.5 "` | `Number(42.0)`, `Number(4.5)` |
//! | `""` or null | `Null` |
//! | `Number(n)` | `Number(n)` |
//! | anything else | [`CoercionError`] |
//!
//! The validator rejects malformed numbers before submit coerces, so the
//! error case only arises when `coerce` is called on unvalidated values.

use layoutform_core::CoercionError;

use crate::fields::{FieldDescriptor, InputKind};
use crate::layout::Layout;
use crate::value::{Payload, Value, Values};

/// Parses trimmed text as a finite `f64`.
///
/// # Examples
///
/// ```
/// use layoutform_engine::coercion::parse_number;
///
/// assert_eq!(parse_number(" 42 "), Some(42.0));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number("NaN"), None);
/// ```
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Converts one field's value to its submitted form.
///
/// # Errors
///
/// Returns a [`CoercionError`] if a number field holds text that is not a
/// finite number, or a boolean.
pub fn coerce_value(field: &FieldDescriptor, value: &Value) -> Result<Value, CoercionError> {
    if field.input_kind != InputKind::Number {
        return Ok(value.clone());
    }

    match value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) if n.is_finite() => Ok(Value::Number(*n)),
        Value::Text(s) if s.trim().is_empty() => Ok(Value::Null),
        Value::Text(s) => parse_number(s)
            .map(Value::Number)
            .ok_or_else(|| CoercionError::new(&field.id, s.clone(), "number")),
        other => Err(CoercionError::new(&field.id, other.to_string(), "number")),
    }
}

/// Builds the submission payload from `values`.
///
/// The payload has one entry per layout field. Missing values are
/// submitted as `Null`.
///
/// # Errors
///
/// Returns the [`CoercionError`] of the first field, in layout order, that
/// cannot be converted.
pub fn coerce(values: &Values, layout: &Layout) -> Result<Payload, CoercionError> {
    layout
        .iter()
        .map(|field| {
            let value = values.get(&field.id).unwrap_or(&Value::Null);
            coerce_value(field, value).map(|v| (field.id.clone(), v))
        })
        .collect()
}
