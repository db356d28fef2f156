//! # layoutform-test
//!
//! Testing utilities for layoutform. Provides a recording submit handler and
//! clear side channel, assertion helpers over form state, a settings
//! builder, and ready-made layouts.
//!
//! ## Modules
//!
//! - [`submission_outbox`] - [`SubmissionOutbox`] and [`ClearLog`]
//! - [`assertions`] - State assertions (`assert_field_error`, `assert_bijection`, ...)
//! - [`settings`] - [`SettingsOverride`] builder
//! - [`fixtures`] - Sample layouts

pub mod assertions;
pub mod fixtures;
pub mod settings;
pub mod submission_outbox;

pub use assertions::{assert_bijection, assert_field_error, assert_no_errors, assert_value};
pub use settings::SettingsOverride;
pub use submission_outbox::{ClearLog, SubmissionOutbox};
