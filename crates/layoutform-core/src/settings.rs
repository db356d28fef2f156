//! Settings for the form engine.
//!
//! This module provides the [`Settings`] struct, which holds the engine's
//! configuration (validation messages, input limits, logging), and
//! [`LazySettings`], a globally-accessible, lazily-initialized settings
//! instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The default message recorded for an empty required field.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Field is required";

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use layoutform_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.required_message, "Field is required");
/// assert_eq!(settings.default_max_chars, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Validation ───────────────────────────────────────────────────

    /// Message recorded for a required field holding `""` or null.
    pub required_message: String,
    /// Message recorded for a number field holding non-numeric text.
    pub invalid_number_message: String,
    /// Message recorded for a date field not in `YYYY-MM-DD` form.
    pub invalid_date_message: String,
    /// Message recorded for text longer than the field's `max_chars`.
    /// `{max}` is replaced with the limit.
    pub max_chars_message: String,
    /// Message recorded for a dropdown/radio value outside its choices.
    /// `{value}` is replaced with the offending value.
    pub invalid_choice_message: String,
    /// Whether hidden fields are validated on submit.
    pub validate_hidden_fields: bool,

    // ── Input ────────────────────────────────────────────────────────

    /// Upper bound on text input applied by change handlers when a field
    /// sets no `max_chars` of its own.
    pub default_max_chars: usize,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,

            // Validation
            required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
            invalid_number_message: "Enter a number".to_string(),
            invalid_date_message: "Enter a valid date (YYYY-MM-DD)".to_string(),
            max_chars_message: "Ensure this value has at most {max} characters".to_string(),
            invalid_choice_message: "Select a valid choice. {value} is not one of the available choices".to_string(),
            validate_hidden_fields: true,

            // Input
            default_max_chars: 1000,

            // Logging
            log_level: "info".to_string(),

            // Extra
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Renders the `max_chars` message for the given limit.
    pub fn max_chars_message_for(&self, max: usize) -> String {
        self.max_chars_message.replace("{max}", &max.to_string())
    }

    /// Renders the invalid-choice message for the given value.
    pub fn invalid_choice_message_for(&self, value: &str) -> String {
        self.invalid_choice_message.replace("{value}", value)
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns the configured settings, or the defaults if
    /// [`configure`](Self::configure) has not been called yet.
    ///
    /// Reading never configures the instance, so a later `configure` still
    /// succeeds.
    pub fn get(&self) -> &Settings {
        static DEFAULTS: OnceLock<Settings> = OnceLock::new();
        self.inner
            .get()
            .unwrap_or_else(|| DEFAULTS.get_or_init(Settings::default))
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
