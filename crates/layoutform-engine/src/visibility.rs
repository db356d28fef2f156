//! Field visibility.
//!
//! Visibility is derived from the current values on every read and is never
//! stored in form state. A field is hidden while any of its hide conditions
//! matches.

use std::collections::HashMap;

use crate::fields::{FieldDescriptor, HideCondition};
use crate::layout::Layout;
use crate::value::Values;

impl HideCondition {
    /// Returns `true` if the source field's current value is one of the
    /// triggering values. A source with no value never matches.
    pub fn matches(&self, values: &Values) -> bool {
        values
            .get(&self.source_field_id)
            .is_some_and(|current| self.triggering_values.contains(current))
    }
}

/// Returns `true` unless one of `field`'s hide conditions matches `values`.
///
/// # Examples
///
/// ```
/// use layoutform_engine::fields::{FieldDescriptor, InputKind};
/// use layoutform_engine::value::{Value, Values};
/// use layoutform_engine::visibility::is_visible;
///
/// let b = FieldDescriptor::new("B", InputKind::Text).hide_when("A", [1, 2]);
///
/// let mut values = Values::new();
/// values.insert("A".into(), Value::from(1));
/// assert!(!is_visible(&b, &values));
///
/// values.insert("A".into(), Value::from(3));
/// assert!(is_visible(&b, &values));
/// ```
pub fn is_visible(field: &FieldDescriptor, values: &Values) -> bool {
    !field.hide_conditions.iter().any(|c| c.matches(values))
}

/// Computes visibility for every field in the layout.
pub fn visibility(layout: &Layout, values: &Values) -> HashMap<String, bool> {
    layout
        .iter()
        .map(|f| (f.id.clone(), is_visible(f, values)))
        .collect()
}

/// Returns the ids of the hidden fields, in layout order.
pub fn hidden_fields<'a>(layout: &'a Layout, values: &Values) -> Vec<&'a str> {
    layout
        .iter()
        .filter(|f| !is_visible(f, values))
        .map(|f| f.id.as_str())
        .collect()
}
