//! Default-value resolution.

use crate::layout::Layout;
use crate::value::{Value, Values};

/// Computes the initial values for every field in `layout`.
///
/// For each field, a non-null seed value wins; otherwise the field's
/// `default_value`; otherwise the kind's empty value (`false` for booleans,
/// `""` for everything else). Seed entries for ids the layout does not
/// contain are dropped, so the result always has exactly one entry per
/// layout field.
///
/// # Examples
///
/// ```
/// use layoutform_engine::defaults::resolve;
/// use layoutform_engine::fields::{FieldDescriptor, InputKind};
/// use layoutform_engine::layout::Layout;
/// use layoutform_engine::value::Value;
///
/// let layout = Layout::new(vec![
///     FieldDescriptor::new("agree", InputKind::Boolean),
///     FieldDescriptor::new("name", InputKind::Text),
/// ])
/// .unwrap();
///
/// let values = resolve(&layout, None);
/// assert_eq!(values["agree"], Value::Bool(false));
/// assert_eq!(values["name"], Value::from(""));
/// ```
pub fn resolve(layout: &Layout, seed: Option<&Values>) -> Values {
    if let Some(seed) = seed {
        for key in seed.keys().filter(|k| !layout.contains(k)) {
            tracing::debug!(field = %key, "dropping seed value for unknown field");
        }
    }

    layout
        .iter()
        .map(|field| {
            let value = seed
                .and_then(|s| s.get(&field.id))
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| field.initial_value());
            (field.id.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldDescriptor, InputKind};

    fn layout() -> Layout {
        Layout::new(vec![
            FieldDescriptor::new("active", InputKind::Boolean),
            FieldDescriptor::new("name", InputKind::Text),
            FieldDescriptor::new("born", InputKind::Date),
            FieldDescriptor::new("age", InputKind::Number).default_value("30"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_values_by_kind() {
        let values = resolve(&layout(), None);
        assert_eq!(values.len(), 4);
        assert_eq!(values["active"], Value::Bool(false));
        assert_eq!(values["name"], Value::from(""));
        assert_eq!(values["born"], Value::from(""));
        assert_eq!(values["age"], Value::from("30"));
    }

    #[test]
    fn test_seed_takes_precedence_over_default() {
        let seed = Values::from([("age".to_string(), Value::from("45"))]);
        let values = resolve(&layout(), Some(&seed));
        assert_eq!(values["age"], Value::from("45"));
    }

    #[test]
    fn test_falsy_seed_values_are_kept() {
        let layout = Layout::new(vec![
            FieldDescriptor::new("active", InputKind::Boolean).default_value(true),
            FieldDescriptor::new("name", InputKind::Text).default_value("anon"),
        ])
        .unwrap();
        let seed = Values::from([
            ("active".to_string(), Value::Bool(false)),
            ("name".to_string(), Value::from("")),
        ]);
        let values = resolve(&layout, Some(&seed));
        assert_eq!(values["active"], Value::Bool(false));
        assert_eq!(values["name"], Value::from(""));
    }

    #[test]
    fn test_null_seed_counts_as_absent() {
        let seed = Values::from([("age".to_string(), Value::Null)]);
        let values = resolve(&layout(), Some(&seed));
        assert_eq!(values["age"], Value::from("30"));
    }

    #[test]
    fn test_unknown_seed_keys_are_dropped() {
        let seed = Values::from([("ghost".to_string(), Value::from("boo"))]);
        let values = resolve(&layout(), Some(&seed));
        assert!(!values.contains_key("ghost"));
        assert_eq!(values.len(), 4);
    }
}
