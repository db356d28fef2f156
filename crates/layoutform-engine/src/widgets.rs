//! Input widgets: renderers and change handlers per input kind.
//!
//! Every [`InputKind`] is bound to an [`InputBinding`]: a [`Renderer`] that
//! draws a [`BoundField`] as HTML, and a [`ChangeHandler`] that turns a raw
//! [`InputEvent`] from that widget into a new field value. The
//! [`InputRegistry`] starts with a default binding for all seven kinds, and
//! callers may replace the renderer or change handler of any kind.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use layoutform_core::Settings;

use crate::bound_field::BoundField;
use crate::fields::{FieldDescriptor, InputKind};
use crate::value::Value;

/// Smallest value a number input accepts.
pub const NUMBER_MIN: i64 = -1_000_000_000;
/// Largest value a number input accepts.
pub const NUMBER_MAX: i64 = 1_000_000_000;

/// A raw edit event from an input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A checkbox was toggled.
    Checked(bool),
    /// The widget's text changed.
    Text(String),
}

/// Turns an input event into the field's new value.
///
/// Returns `None` to reject the event, leaving the field unchanged.
pub type ChangeHandler = fn(&FieldDescriptor, InputEvent, &Settings) -> Option<Value>;

/// Renders a bound field's input element as HTML.
///
/// Renderers must be `Send + Sync` so that a registry can be shared across
/// threads.
pub trait Renderer: Send + Sync + fmt::Debug {
    /// Renders the input element (without label or error) for `field`.
    fn render(&self, field: &BoundField) -> String;
}

/// The renderer and change handler used for one input kind.
#[derive(Debug, Clone)]
pub struct InputBinding {
    /// Draws the input.
    pub renderer: Arc<dyn Renderer>,
    /// Interprets edits to the input.
    pub change_handler: ChangeHandler,
}

impl InputBinding {
    /// Creates a new `InputBinding`.
    pub fn new(renderer: impl Renderer + 'static, change_handler: ChangeHandler) -> Self {
        Self {
            renderer: Arc::new(renderer),
            change_handler,
        }
    }
}

/// Returns the built-in binding for `kind`.
pub fn default_binding(kind: InputKind) -> InputBinding {
    match kind {
        InputKind::Boolean => InputBinding::new(CheckboxInput, boolean_change_handler),
        InputKind::Date => InputBinding::new(DateInput, text_change_handler),
        InputKind::Dropdown => InputBinding::new(Select, text_change_handler),
        InputKind::Number => InputBinding::new(NumberInput, text_change_handler),
        InputKind::Radio => InputBinding::new(RadioSelect, text_change_handler),
        InputKind::Text => InputBinding::new(TextInput, text_change_handler),
        InputKind::Textarea => InputBinding::new(Textarea, text_change_handler),
    }
}

/// Lookup table from input kind to its binding.
///
/// # Examples
///
/// ```
/// use layoutform_engine::bound_field::BoundField;
/// use layoutform_engine::fields::InputKind;
/// use layoutform_engine::widgets::{InputRegistry, Renderer};
///
/// #[derive(Debug)]
/// struct Stars;
///
/// impl Renderer for Stars {
///     fn render(&self, field: &BoundField) -> String {
///         format!("<stars name=\"{}\"></stars>", field.id)
///     }
/// }
///
/// let mut registry = InputRegistry::default();
/// registry.override_renderer(InputKind::Number, Stars);
/// assert!(format!("{:?}", registry.binding(InputKind::Number).renderer).contains("Stars"));
/// ```
#[derive(Debug, Clone)]
pub struct InputRegistry {
    bindings: HashMap<InputKind, InputBinding>,
}

impl Default for InputRegistry {
    fn default() -> Self {
        Self {
            bindings: InputKind::ALL
                .into_iter()
                .map(|kind| (kind, default_binding(kind)))
                .collect(),
        }
    }
}

impl InputRegistry {
    /// Returns the binding for `kind`.
    pub fn binding(&self, kind: InputKind) -> InputBinding {
        self.bindings
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| default_binding(kind))
    }

    /// Replaces the whole binding for `kind`.
    pub fn set(&mut self, kind: InputKind, binding: InputBinding) {
        self.bindings.insert(kind, binding);
    }

    /// Replaces the renderer for `kind`, keeping its change handler.
    pub fn override_renderer(&mut self, kind: InputKind, renderer: impl Renderer + 'static) {
        let handler = self.binding(kind).change_handler;
        self.set(kind, InputBinding::new(renderer, handler));
    }

    /// Replaces the change handler for `kind`, keeping its renderer.
    pub fn override_change_handler(&mut self, kind: InputKind, handler: ChangeHandler) {
        let renderer = self.binding(kind).renderer;
        self.set(
            kind,
            InputBinding {
                renderer,
                change_handler: handler,
            },
        );
    }

    /// Routes `event` through the change handler registered for the field's
    /// kind.
    pub fn handle(&self, field: &FieldDescriptor, event: InputEvent, settings: &Settings) -> Option<Value> {
        (self.binding(field.input_kind).change_handler)(field, event, settings)
    }
}

// ---------------------------------------------------------------------------
// Change handlers
// ---------------------------------------------------------------------------

/// Takes the checked state of a checkbox. Text events are rejected.
pub fn boolean_change_handler(
    field: &FieldDescriptor,
    event: InputEvent,
    _settings: &Settings,
) -> Option<Value> {
    match event {
        InputEvent::Checked(checked) => Some(Value::Bool(checked)),
        InputEvent::Text(_) => {
            tracing::debug!(field = %field.id, "ignoring text event on checkbox");
            None
        }
    }
}

/// Takes the widget's text, rejecting text longer than the field's
/// `max_chars` (or `default_max_chars` when the field sets none).
pub fn text_change_handler(
    field: &FieldDescriptor,
    event: InputEvent,
    settings: &Settings,
) -> Option<Value> {
    match event {
        InputEvent::Text(text) => {
            let max = field.max_chars.unwrap_or(settings.default_max_chars);
            if text.chars().count() > max {
                tracing::debug!(field = %field.id, max, "rejecting input over the length limit");
                return None;
            }
            Some(Value::Text(text))
        }
        InputEvent::Checked(_) => {
            tracing::debug!(field = %field.id, "ignoring checked event on text input");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// HTML helpers
// ---------------------------------------------------------------------------

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Boolean attributes, rendered without a value.
const FLAG_ATTRS: [&str; 3] = ["autofocus", "checked", "required"];

/// Formats attributes as ` key="value"`, sorted by key.
fn render_attrs(attrs: &[(&str, String)]) -> String {
    let mut sorted: Vec<_> = attrs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .into_iter()
        .map(|(k, v)| {
            if FLAG_ATTRS.contains(k) {
                format!(" {k}")
            } else {
                format!(r#" {k}="{}""#, escape(v))
            }
        })
        .collect()
}

/// The attributes every input carries: `id`, `name`, and the `required`
/// and `autofocus` flags.
fn common_attrs(field: &BoundField) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("id", field.auto_id()), ("name", field.id.clone())];
    if field.required {
        attrs.push(("required", String::new()));
    }
    if field.autofocus {
        attrs.push(("autofocus", String::new()));
    }
    attrs
}

fn text_attrs(field: &BoundField) -> Vec<(&'static str, String)> {
    let mut attrs = common_attrs(field);
    attrs.push(("value", field.display_value()));
    if let Some(max) = field.max_chars {
        attrs.push(("maxlength", max.to_string()));
    }
    attrs
}

// ---------------------------------------------------------------------------
// Built-in renderers
// ---------------------------------------------------------------------------

/// A `<input type="checkbox">` renderer.
#[derive(Debug, Clone, Copy)]
pub struct CheckboxInput;

impl Renderer for CheckboxInput {
    fn render(&self, field: &BoundField) -> String {
        let mut attrs = common_attrs(field);
        if field.is_checked() {
            attrs.push(("checked", String::new()));
        }
        format!(r#"<input type="checkbox"{} />"#, render_attrs(&attrs))
    }
}

/// A `<input type="date">` renderer.
#[derive(Debug, Clone, Copy)]
pub struct DateInput;

impl Renderer for DateInput {
    fn render(&self, field: &BoundField) -> String {
        let mut attrs = common_attrs(field);
        attrs.push(("value", field.display_value()));
        format!(r#"<input type="date"{} />"#, render_attrs(&attrs))
    }
}

/// A `<select>` renderer.
#[derive(Debug, Clone, Copy)]
pub struct Select;

impl Renderer for Select {
    fn render(&self, field: &BoundField) -> String {
        let current = field.value.to_string();
        let mut options = String::from(r#"<option value=""></option>"#);
        for choice in &field.choices {
            let selected = if choice.value == current { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape(&choice.value),
                escape(&choice.display)
            ));
        }
        format!(
            "<select{}>{options}</select>",
            render_attrs(&common_attrs(field))
        )
    }
}

/// A `<input type="number">` renderer. The step follows the field's
/// precision: `0.01` for two decimal places, `1` when unset.
#[derive(Debug, Clone, Copy)]
pub struct NumberInput;

impl Renderer for NumberInput {
    fn render(&self, field: &BoundField) -> String {
        let step = match field.precision {
            Some(p) if p > 0 => format!("0.{}1", "0".repeat(p as usize - 1)),
            _ => "1".to_string(),
        };
        let mut attrs = common_attrs(field);
        attrs.extend([
            ("value", field.display_value()),
            ("min", NUMBER_MIN.to_string()),
            ("max", NUMBER_MAX.to_string()),
            ("step", step),
        ]);
        format!(r#"<input type="number"{} />"#, render_attrs(&attrs))
    }
}

/// A group of `<input type="radio">` elements, one per choice.
#[derive(Debug, Clone, Copy)]
pub struct RadioSelect;

impl Renderer for RadioSelect {
    fn render(&self, field: &BoundField) -> String {
        let current = field.value.to_string();
        let id_base = field.auto_id();
        let mut html = format!(r#"<div id="{}">"#, escape(&id_base));
        for (i, choice) in field.choices.iter().enumerate() {
            let option_id = format!("{id_base}_{i}");
            let mut attrs = vec![
                ("id", option_id.clone()),
                ("name", field.id.clone()),
                ("value", choice.value.clone()),
            ];
            if choice.value == current {
                attrs.push(("checked", String::new()));
            }
            html.push_str(&format!(
                r#"<div><input type="radio"{} /> <label for="{}">{}</label></div>"#,
                render_attrs(&attrs),
                escape(&option_id),
                escape(&choice.display)
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// A `<input type="text">` renderer.
#[derive(Debug, Clone, Copy)]
pub struct TextInput;

impl Renderer for TextInput {
    fn render(&self, field: &BoundField) -> String {
        format!(r#"<input type="text"{} />"#, render_attrs(&text_attrs(field)))
    }
}

/// A `<textarea>` renderer.
#[derive(Debug, Clone, Copy)]
pub struct Textarea;

impl Renderer for Textarea {
    fn render(&self, field: &BoundField) -> String {
        let mut attrs = common_attrs(field);
        if let Some(max) = field.max_chars {
            attrs.push(("maxlength", max.to_string()));
        }
        format!(
            "<textarea{}>{}</textarea>",
            render_attrs(&attrs),
            escape(&field.display_value())
        )
    }
}
