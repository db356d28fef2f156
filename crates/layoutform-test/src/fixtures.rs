//! Ready-made layouts for tests.
//!
//! Each fixture returns a fresh, valid [`Layout`]. They cover the shapes
//! that come up again and again: a small contact form, a form with
//! conditionally hidden fields, and a form with one field of every kind.

use layoutform_engine::fields::{FieldDescriptor, InputKind};
use layoutform_engine::layout::Layout;

/// A contact form: required `name`, optional numeric `age`, and a
/// `subscribe` checkbox.
///
/// # Panics
///
/// Never, the layout is statically valid.
pub fn contact_layout() -> Layout {
    Layout::new(vec![
        FieldDescriptor::new("name", InputKind::Text)
            .label("Name")
            .span(6)
            .max_chars(40)
            .required(true),
        FieldDescriptor::new("age", InputKind::Number).label("Age").span(4),
        FieldDescriptor::new("subscribe", InputKind::Boolean).label("Subscribe"),
    ])
    .expect("contact layout is valid")
}

/// A form whose `email` field is hidden until `subscribe` is checked, and
/// whose `reason` field is hidden unless `plan` is `"other"`.
///
/// # Panics
///
/// Never, the layout is statically valid.
pub fn conditional_layout() -> Layout {
    Layout::new(vec![
        FieldDescriptor::new("subscribe", InputKind::Boolean),
        FieldDescriptor::new("email", InputKind::Text)
            .required(true)
            .hide_when("subscribe", [false]),
        FieldDescriptor::new("plan", InputKind::Radio)
            .choice("basic", "Basic")
            .choice("pro", "Pro")
            .choice("other", "Other")
            .default_value("basic"),
        FieldDescriptor::new("reason", InputKind::Textarea).hide_when("plan", ["basic", "pro"]),
    ])
    .expect("conditional layout is valid")
}

/// One field of every input kind, keyed by the kind's name.
///
/// # Panics
///
/// Never, the layout is statically valid.
pub fn every_kind_layout() -> Layout {
    Layout::new(
        InputKind::ALL
            .into_iter()
            .map(|kind| {
                let field = FieldDescriptor::new(kind.as_str(), kind);
                if kind.requires_choices() {
                    field.choice("a", "A").choice("b", "B")
                } else {
                    field
                }
            })
            .collect(),
    )
    .expect("every-kind layout is valid")
}
