//! # layoutform-engine
//!
//! A declarative, layout-driven form engine. A [`Layout`](layout::Layout) of
//! field descriptors drives default values, conditional visibility,
//! validation, type coercion on submit, and the per-field snapshots a
//! rendering layer draws from.
//!
//! ## Modules
//!
//! - [`value`] - Field values and the value, error, and payload maps
//! - [`fields`] - Field descriptors and input kinds
//! - [`layout`] - Validated, ordered layouts and the layout checks
//! - [`defaults`] - Initial value resolution
//! - [`visibility`] - Hide-condition evaluation
//! - [`validation`] - Per-field validation rules
//! - [`coercion`] - Payload type coercion
//! - [`form`] - The form state machine and [`FormControl`](form::FormControl)
//! - [`bound_field`] - Field snapshots for rendering
//! - [`widgets`] - Renderers and change handlers per input kind

pub mod bound_field;
pub mod coercion;
pub mod defaults;
pub mod fields;
pub mod form;
pub mod layout;
pub mod validation;
pub mod value;
pub mod visibility;
pub mod widgets;
