//! Settings builder for tests.
//!
//! [`SettingsOverride`] starts from [`Settings::default()`] and changes only
//! what a test names, so each test states the settings it depends on.
//!
//! ## Example
//!
//! ```rust
//! use layoutform_test::settings::SettingsOverride;
//!
//! let settings = SettingsOverride::new()
//!     .required_message("Required")
//!     .validate_hidden_fields(false)
//!     .build();
//!
//! assert_eq!(settings.required_message, "Required");
//! assert!(!settings.validate_hidden_fields);
//! ```

use layoutform_core::Settings;

/// A builder for test settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverride {
    settings: Settings,
}

impl SettingsOverride {
    /// Creates a new override builder starting from default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new override builder starting from the given settings.
    pub const fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Sets the `debug` flag.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.settings.debug = debug;
        self
    }

    /// Sets the message for empty required fields.
    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.settings.required_message = message.into();
        self
    }

    /// Sets the message for malformed numbers.
    #[must_use]
    pub fn invalid_number_message(mut self, message: impl Into<String>) -> Self {
        self.settings.invalid_number_message = message.into();
        self
    }

    /// Sets whether hidden fields are validated.
    #[must_use]
    pub const fn validate_hidden_fields(mut self, validate: bool) -> Self {
        self.settings.validate_hidden_fields = validate;
        self
    }

    /// Sets the input length limit for fields without `max_chars`.
    #[must_use]
    pub const fn default_max_chars(mut self, max: usize) -> Self {
        self.settings.default_max_chars = max;
        self
    }

    /// Returns the built settings.
    pub fn build(self) -> Settings {
        self.settings
    }
}
