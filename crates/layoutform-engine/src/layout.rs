//! Form layouts.
//!
//! A [`Layout`] is the ordered list of field descriptors that defines a form.
//! Layouts can only be built through [`Layout::new`] or
//! [`Layout::from_json_str`], both of which run the layout checks: any
//! error-level finding fails construction, warnings are logged.

use std::collections::{HashMap, HashSet};

use layoutform_core::checks::{CheckMessage, CheckRegistry};
use layoutform_core::{FormError, FormResult};

use crate::fields::{FieldDescriptor, InputKind, GRID_COLUMNS};
use crate::value::Value;

/// The largest number of decimal places a number field may display.
pub const MAX_PRECISION: u32 = 20;

/// A validated, ordered set of field descriptors with unique ids.
///
/// # Examples
///
/// ```
/// use layoutform_engine::fields::{FieldDescriptor, InputKind};
/// use layoutform_engine::layout::Layout;
///
/// let layout = Layout::new(vec![
///     FieldDescriptor::new("name", InputKind::Text).required(true),
///     FieldDescriptor::new("age", InputKind::Number).span(3),
/// ])
/// .unwrap();
///
/// assert_eq!(layout.len(), 2);
/// assert_eq!(layout.first().unwrap().id, "name");
/// assert!(layout.contains("age"));
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl Layout {
    /// Builds a layout, running every layout check.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ImproperlyConfigured`] listing every error-level
    /// finding (duplicate or empty ids, unknown hide-condition sources,
    /// oversized spans or precisions, choice fields without choices).
    pub fn new(fields: Vec<FieldDescriptor>) -> FormResult<Self> {
        let messages = layout_checks().run_checks(None, fields.as_slice());

        let mut errors = Vec::new();
        for message in messages {
            if message.is_error() {
                errors.push(message.to_string());
            } else if message.is_serious() {
                tracing::warn!(
                    check = message.id.as_deref().unwrap_or_default(),
                    field = message.obj.as_deref().unwrap_or_default(),
                    "{}",
                    message.msg
                );
            }
        }
        if !errors.is_empty() {
            return Err(FormError::ImproperlyConfigured(errors.join("\n")));
        }

        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();

        tracing::debug!(fields = fields.len(), "layout built");
        Ok(Self { fields, index })
    }

    /// Builds a layout from a JSON array of field descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SerializationError`] for malformed JSON and
    /// [`FormError::ImproperlyConfigured`] if the layout checks fail.
    pub fn from_json_str(json: &str) -> FormResult<Self> {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Self::new(fields)
    }

    /// Returns the fields in layout order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the field with the given id.
    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.index.get(id).map(|&i| &self.fields[i])
    }

    /// Returns `true` if the layout has a field with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the field ids in layout order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the layout has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the first field, which receives initial focus.
    pub fn first(&self) -> Option<&FieldDescriptor> {
        self.fields.first()
    }

    /// Returns the fields whose widgets keep their own displayed state.
    pub fn uncontrolled_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.input_kind.is_uncontrolled())
    }

    /// Iterates over the fields in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Returns a registry loaded with every layout check.
pub fn layout_checks() -> CheckRegistry<[FieldDescriptor]> {
    let mut registry = CheckRegistry::new();
    registry.register(check_ids, &["layout", "ids"]);
    registry.register(check_hide_conditions, &["layout", "visibility"]);
    registry.register(check_geometry, &["layout", "geometry"]);
    registry.register(check_choices, &["layout", "choices"]);
    registry.register(check_field_options, &["layout"]);
    registry
}

// ============================================================
// Layout checks
// ============================================================

fn check_ids(fields: &[FieldDescriptor]) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    let mut seen = HashSet::new();

    for field in fields {
        if field.id.is_empty() {
            messages.push(CheckMessage::error(
                "Field id is empty.",
                Some("Every field needs a non-empty id."),
                None,
                Some("layout.E005"),
            ));
        } else if !seen.insert(field.id.as_str()) {
            messages.push(CheckMessage::error(
                format!("Duplicate field id '{}'.", field.id),
                Some("Field ids must be unique within a layout."),
                Some(&field.id),
                Some("layout.E001"),
            ));
        }
    }

    messages
}

fn check_hide_conditions(fields: &[FieldDescriptor]) -> Vec<CheckMessage> {
    let ids: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
    let mut messages = Vec::new();

    for field in fields {
        for condition in &field.hide_conditions {
            let source = condition.source_field_id.as_str();
            if source == field.id {
                messages.push(CheckMessage::error(
                    format!("Field '{}' has a hide condition on itself.", field.id),
                    Some("A hidden field cannot be edited back to visible."),
                    Some(&field.id),
                    Some("layout.E006"),
                ));
            } else if !ids.contains(source) {
                messages.push(CheckMessage::error(
                    format!(
                        "Field '{}' has a hide condition on unknown field '{source}'.",
                        field.id
                    ),
                    None,
                    Some(&field.id),
                    Some("layout.E002"),
                ));
            }
        }
    }

    messages
}

fn check_geometry(fields: &[FieldDescriptor]) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    for field in fields {
        if field.span > GRID_COLUMNS {
            messages.push(CheckMessage::error(
                format!(
                    "Field '{}' spans {} columns; a row has {GRID_COLUMNS}.",
                    field.id, field.span
                ),
                None,
                Some(&field.id),
                Some("layout.E003"),
            ));
            continue;
        }

        let total = u16::from(field.span)
            + u16::from(field.padding_left.unwrap_or(0))
            + u16::from(field.padding_right.unwrap_or(0));
        if total > u16::from(GRID_COLUMNS) {
            messages.push(CheckMessage::warning(
                format!(
                    "Field '{}' needs {total} columns including padding; it will wrap.",
                    field.id
                ),
                None,
                Some(&field.id),
                Some("layout.W004"),
            ));
        }
    }

    messages
}

fn check_choices(fields: &[FieldDescriptor]) -> Vec<CheckMessage> {
    fields
        .iter()
        .filter(|f| f.input_kind.requires_choices() && f.choices.is_empty())
        .map(|f| {
            CheckMessage::error(
                format!("{} field '{}' has no choices.", f.input_kind, f.id),
                Some("Add at least one choice."),
                Some(&f.id),
                Some("layout.E004"),
            )
        })
        .collect()
}

fn default_matches_kind(kind: InputKind, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) => kind == InputKind::Boolean,
        Value::Number(_) => kind == InputKind::Number,
        Value::Text(_) => kind != InputKind::Boolean,
    }
}

fn check_field_options(fields: &[FieldDescriptor]) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    for field in fields {
        if let Some(default) = &field.default_value {
            if !default_matches_kind(field.input_kind, default) {
                messages.push(CheckMessage::warning(
                    format!(
                        "Field '{}' is {} but its default value is {}.",
                        field.id,
                        field.input_kind,
                        default.type_name()
                    ),
                    None,
                    Some(&field.id),
                    Some("layout.W001"),
                ));
            }
        }
        if let Some(precision) = field.precision.filter(|p| *p > MAX_PRECISION) {
            messages.push(CheckMessage::error(
                format!(
                    "Field '{}' has precision {precision}; at most {MAX_PRECISION} decimal places are supported.",
                    field.id
                ),
                None,
                Some(&field.id),
                Some("layout.E007"),
            ));
        }
        if field.precision.is_some() && field.input_kind != InputKind::Number {
            messages.push(CheckMessage::warning(
                format!("Field '{}' sets precision but is not a number field.", field.id),
                None,
                Some(&field.id),
                Some("layout.W002"),
            ));
        }
        if field.max_chars.is_some() && field.input_kind == InputKind::Boolean {
            messages.push(CheckMessage::warning(
                format!("Field '{}' sets max_chars but is a boolean field.", field.id),
                None,
                Some(&field.id),
                Some("layout.W003"),
            ));
        }
    }

    messages
}
