//! Core error types for layoutform.
//!
//! User-facing problems (an empty required field, a malformed number) are
//! never errors in this sense: they are data, carried in the form's error
//! map. [`FormError`] is reserved for the programmer-facing failures that
//! should stop the caller immediately: a broken layout, an unknown field id,
//! a bad settings file.

use std::fmt;

use thiserror::Error;

/// A value that could not be converted to its field's logical type.
///
/// Produced by type coercion when a number field holds text that does not
/// parse as a number. Distinguishable from every valid payload value,
/// including zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    /// The field whose value could not be converted.
    pub field: String,
    /// The raw value as it was held in the form state.
    pub raw: String,
    /// The logical type the value should have converted to (e.g. "number").
    pub expected: String,
}

impl CoercionError {
    /// Creates a new `CoercionError`.
    pub fn new(
        field: impl Into<String>,
        raw: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            raw: raw.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': cannot convert {:?} to {}",
            self.field, self.raw, self.expected
        )
    }
}

impl std::error::Error for CoercionError {}

/// The primary error type for layoutform.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Layout ───────────────────────────────────────────────────────

    /// The layout is broken (duplicate ids, dangling hide conditions, ...).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// An operation named a field id that is not part of the layout.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    // ── Values ───────────────────────────────────────────────────────

    /// A value could not be coerced to its field's logical type.
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    // ── Configuration ────────────────────────────────────────────────

    /// A settings value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns `true` for errors caused by the layout or the caller's use of
    /// it, as opposed to settings or I/O problems.
    pub const fn is_layout_error(&self) -> bool {
        matches!(self, Self::ImproperlyConfigured(_) | Self::UnknownField(_))
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_error_display() {
        let err = CoercionError::new("age", "abc", "number");
        assert_eq!(err.to_string(), "field 'age': cannot convert \"abc\" to number");
    }

    #[test]
    fn test_coercion_error_converts_into_form_error() {
        let err: FormError = CoercionError::new("age", "1.2.3", "number").into();
        assert!(matches!(err, FormError::Coercion(_)));
        assert!(err.to_string().starts_with("Coercion error: field 'age'"));
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::UnknownField("nickname".into());
        assert_eq!(err.to_string(), "Unknown field: nickname");

        let err = FormError::ImproperlyConfigured("duplicate field id 'a'".into());
        assert_eq!(err.to_string(), "Improperly configured: duplicate field id 'a'");
    }

    #[test]
    fn test_is_layout_error() {
        assert!(FormError::ImproperlyConfigured("x".into()).is_layout_error());
        assert!(FormError::UnknownField("x".into()).is_layout_error());
        assert!(!FormError::ConfigurationError("x".into()).is_layout_error());
        assert!(!FormError::SerializationError("x".into()).is_layout_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormError = json_err.into();
        assert!(matches!(err, FormError::SerializationError(_)));
    }
}
