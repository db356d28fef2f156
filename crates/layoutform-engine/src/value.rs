//! Field value types.
//!
//! The [`Value`] enum is the single type used for field values, defaults,
//! hide-condition triggers, and the submission payload. It is deliberately
//! small: while the user is editing, number and date fields hold
//! [`Value::Text`]; only submission coerces numbers to [`Value::Number`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A field value.
///
/// Serializes untagged, so JSON `null`, `true`, `4.5`, and `"abc"` map
/// directly onto `Null`, `Bool`, `Number`, and `Text`.
///
/// Equality is strict: `Number(1.0)` and `Text("1")` are different values.
///
/// # Examples
///
/// ```
/// use layoutform_engine::value::Value;
///
/// assert_eq!(Value::from(42), Value::Number(42.0));
/// assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
/// assert!(Value::from("").is_missing());
/// assert!(!Value::from(false).is_missing());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean (checkbox) value.
    Bool(bool),
    /// A numeric value, produced by coercion or supplied as a default.
    Number(f64),
    /// A string value. Number and date fields hold text until submission.
    Text(String),
}

/// Current field values keyed by field id.
pub type Values = HashMap<String, Value>;

/// Current error messages keyed by field id. Only invalid fields appear.
pub type FieldErrors = HashMap<String, String>;

/// The coerced, validated values handed to the submit handler.
pub type Payload = HashMap<String, Value>;

impl Value {
    /// Returns `true` for the two values that count as "not filled in":
    /// `Null` and the empty string. `false` and `0` are present values.
    pub const fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Returns `true` if this is `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice if this is `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is `Number`.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// A short name for the variant, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
