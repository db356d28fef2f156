//! # layoutform
//!
//! A declarative, layout-driven form state engine.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `layoutform` to get the engine, or on the individual
//! crates for finer-grained control.
//!
//! ## Example
//!
//! ```
//! use layoutform::prelude::*;
//!
//! let layout = Layout::new(vec![
//!     FieldDescriptor::new("name", InputKind::Text).required(true),
//!     FieldDescriptor::new("newsletter", InputKind::Boolean),
//!     FieldDescriptor::new("email", InputKind::Text).hide_when("newsletter", [false]),
//! ])
//! .unwrap();
//!
//! let mut form = FormControl::new(layout, |payload: Payload| {
//!     layoutform::tracing::info!(?payload, "submitted");
//! });
//!
//! assert!(!form.submit().is_submitted());
//! form.change_field("name", "Ada").unwrap();
//! assert!(form.submit().is_submitted());
//! ```

/// Settings, errors, checks, and logging.
pub use layoutform_core as core;

/// Fields, layouts, validation, coercion, and form state.
#[cfg(feature = "engine")]
pub use layoutform_engine as engine;

/// Testing utilities.
#[cfg(feature = "testing")]
pub use layoutform_test as test;

/// Third-party re-exports.
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The types most programs need.
#[cfg(feature = "engine")]
pub mod prelude {
    pub use layoutform_core::{FormError, FormResult, Settings, SETTINGS};
    pub use layoutform_engine::fields::{Choice, FieldDescriptor, HideCondition, InputKind};
    pub use layoutform_engine::form::{
        FormAction, FormControl, FormState, SubmitHandler, SubmitOutcome, UncontrolledInputs,
    };
    pub use layoutform_engine::layout::Layout;
    pub use layoutform_engine::value::{FieldErrors, Payload, Value, Values};
    pub use layoutform_engine::widgets::{InputEvent, InputRegistry, Renderer};
}
