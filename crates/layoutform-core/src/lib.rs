//! # layoutform-core
//!
//! Core types, settings, checks, and error types for layoutform.
//! This crate has no dependency on the form engine and provides the
//! foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Engine settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`checks`] - Diagnostic checks over settings and layouts
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{CoercionError, FormError, FormResult};
pub use settings::{Settings, SETTINGS};
