//! Bound fields: one field's descriptor joined with the current form state.
//!
//! A [`BoundField`] is an owned snapshot the rendering layer reads to draw a
//! single field: its label, current value, error, visibility, and its place
//! in the 10-column layout grid. Snapshots are rebuilt from state on every
//! read; editing one has no effect on the form.

use crate::fields::{Choice, FieldDescriptor, InputKind, GRID_COLUMNS};
use crate::value::{FieldErrors, Value, Values};
use crate::visibility::is_visible;
use crate::widgets::{escape, InputRegistry};

/// A field paired with its current value, error, and layout geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    /// The field id.
    pub id: String,
    /// Label text: the display label, or the id when none is set.
    pub label: String,
    /// The input kind.
    pub kind: InputKind,
    /// The current value.
    pub value: Value,
    /// The current error message, if any.
    pub error: Option<String>,
    /// Whether the field is currently shown.
    pub visible: bool,
    /// Whether the field is required.
    pub required: bool,
    /// Upper bound on text length, if the field sets one.
    pub max_chars: Option<usize>,
    /// Choices for dropdown and radio fields.
    pub choices: Vec<Choice>,
    /// Decimal places for number display.
    pub precision: Option<u32>,
    /// Whether the field receives initial focus (the first field).
    pub autofocus: bool,
    /// Grid columns occupied by the field's cell.
    pub columns: u8,
    /// Width of the input inside its cell, in percent.
    pub width_percent: u16,
    /// Spacer columns before the field.
    pub padding_left: u8,
    /// Spacer columns after the field.
    pub padding_right: u8,
}

impl BoundField {
    /// Binds `field` to the given values and errors.
    ///
    /// A field that fills its line takes every column its left padding
    /// leaves free, and its input is stretched to `span * 10` percent of
    /// that cell. Otherwise the cell is exactly `span` columns and the input
    /// fills it.
    pub fn new(field: &FieldDescriptor, values: &Values, errors: &FieldErrors, autofocus: bool) -> Self {
        let padding_left = field.padding_left.unwrap_or(0);
        let (columns, width_percent) = if field.fill_line {
            (
                GRID_COLUMNS.saturating_sub(padding_left),
                u16::from(field.span) * 10,
            )
        } else {
            (field.span, 100)
        };

        Self {
            id: field.id.clone(),
            label: field.label_text().to_string(),
            kind: field.input_kind,
            value: values.get(&field.id).cloned().unwrap_or_default(),
            error: errors.get(&field.id).cloned(),
            visible: is_visible(field, values),
            required: field.required,
            max_chars: field.max_chars,
            choices: field.choices.clone(),
            precision: field.precision,
            autofocus,
            columns,
            width_percent,
            padding_left,
            padding_right: field.padding_right.unwrap_or(0),
        }
    }

    /// Returns the label as shown above the input: upper-cased, with a
    /// `" * "` marker for required fields.
    pub fn display_label(&self) -> String {
        let marker = if self.required { " * " } else { "" };
        format!("{}{marker}", self.label.to_uppercase())
    }

    /// Returns the value as the input displays it. Numbers are formatted
    /// to `precision` decimal places when one is set.
    pub fn display_value(&self) -> String {
        match (&self.value, self.precision) {
            (Value::Number(n), Some(p)) => format!("{n:.prec$}", prec = p as usize),
            (value, _) => value.to_string(),
        }
    }

    /// Returns `true` if the current value is a checked checkbox.
    pub fn is_checked(&self) -> bool {
        self.value.as_bool().unwrap_or(false)
    }

    /// Returns `true` if this field has an error.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the HTML `id` of the field's input element.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.id)
    }

    /// Renders a `<label>` element for this field.
    pub fn label_tag(&self) -> String {
        format!(
            r#"<label for="{}"><span>{}</span></label>"#,
            escape(&self.auto_id()),
            escape(&self.display_label())
        )
    }

    /// Renders the field's input with the renderer registered for its kind.
    pub fn render(&self, registry: &InputRegistry) -> String {
        registry.binding(self.kind).renderer.render(self)
    }

    /// Renders the complete grid cell: spacer columns, label, input, and
    /// error. Hidden fields are rendered with `display:none`.
    pub fn render_row(&self, registry: &InputRegistry) -> String {
        let mut html = String::new();
        if self.padding_left > 0 {
            html.push_str(&spacer(self.padding_left));
        }

        let display = if self.visible { "" } else { "display:none;" };
        html.push_str(&format!(
            r#"<div class="field" style="{display}grid-column:span {};">"#,
            self.columns
        ));
        html.push_str(&self.label_tag());
        html.push_str(&format!(
            r#"<div style="width:{}%;">{}</div>"#,
            self.width_percent,
            self.render(registry)
        ));
        if let Some(error) = &self.error {
            html.push_str(&format!(r#"<span class="error">{}</span>"#, escape(error)));
        }
        html.push_str("</div>");

        if self.padding_right > 0 {
            html.push_str(&spacer(self.padding_right));
        }
        html
    }
}

fn spacer(columns: u8) -> String {
    format!(r#"<div style="grid-column:span {columns};"></div>"#)
}
