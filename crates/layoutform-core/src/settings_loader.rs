//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LAYOUTFORM_DEBUG` | `debug` |
//! | `LAYOUTFORM_LOG_LEVEL` | `log_level` |
//! | `LAYOUTFORM_REQUIRED_MESSAGE` | `required_message` |
//! | `LAYOUTFORM_DEFAULT_MAX_CHARS` | `default_max_chars` |
//! | `LAYOUTFORM_VALIDATE_HIDDEN_FIELDS` | `validate_hidden_fields` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use layoutform_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/forms.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/forms.json").unwrap();
//! ```

use std::path::Path;

use crate::error::FormError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    from_toml_str(&read_config_file(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    from_json_str(&read_config_file(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `LAYOUTFORM_*` environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes" as true, anything else as
/// false. Numeric variables that do not parse are ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LAYOUTFORM_DEBUG") {
        settings.debug = parse_env_bool(&val);
    }

    if let Ok(val) = std::env::var("LAYOUTFORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LAYOUTFORM_REQUIRED_MESSAGE") {
        settings.required_message = val;
    }

    if let Ok(val) = std::env::var("LAYOUTFORM_DEFAULT_MAX_CHARS") {
        if let Ok(max) = val.parse::<usize>() {
            settings.default_max_chars = max;
        }
    }

    if let Ok(val) = std::env::var("LAYOUTFORM_VALIDATE_HIDDEN_FIELDS") {
        settings.validate_hidden_fields = parse_env_bool(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_env_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config_file(path: &Path, format: &str) -> Result<String, FormError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deep-merges `overrides` over the serialized defaults and deserializes
/// the result, so unspecified settings keep their defaults.
fn merge_over_defaults(
    overrides: serde_json::Value,
    format: &str,
) -> Result<Settings, FormError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overrides);
    serde_json::from_value(merged).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
