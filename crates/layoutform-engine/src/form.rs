//! The form state machine.
//!
//! Form state is a single composite [`FormState`] of values and errors. It
//! changes only through three transitions, each a pure function from the
//! old state and its inputs to the new state:
//!
//! - [`reset`]: recompute every value from the layout defaults, clear errors
//! - [`change_field`]: replace one value, leave errors alone
//! - [`submit`]: validate; when clean, coerce and hand the payload to the
//!   [`SubmitHandler`]; always replace errors with the fresh result
//!
//! [`reduce`] dispatches a [`FormAction`] to the matching transition.
//! [`FormControl`] owns a layout, settings, handler, and the current state,
//! and applies transitions in call order.
//!
//! Every reachable state holds exactly one value per layout field.

use serde::{Deserialize, Serialize};

use layoutform_core::checks::CheckRegistry;
use layoutform_core::logging::form_span;
use layoutform_core::{FormError, FormResult, Settings, SETTINGS};

use crate::bound_field::BoundField;
use crate::coercion::coerce;
use crate::defaults::resolve;
use crate::fields::codes;
use crate::layout::Layout;
use crate::validation::validate;
use crate::value::{FieldErrors, Payload, Value, Values};
use crate::widgets::{InputEvent, InputRegistry};

/// The complete state of a form: current values and current errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// One value per layout field.
    pub values: Values,
    /// Error messages for the fields that failed the last submit.
    pub errors: FieldErrors,
}

impl FormState {
    /// Returns `true` if no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormAction {
    /// Restore every field to its default.
    Reset,
    /// Replace one field's value.
    ChangeField {
        /// The field to change.
        id: String,
        /// Its new value.
        value: Value,
    },
    /// Validate and, if clean, submit.
    Submit,
}

/// The result of a submit transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed and the handler received the payload.
    Submitted,
    /// Validation failed; the handler was not called.
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    /// Returns `true` if the payload was handed to the submit handler.
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// Receives the coerced payload of a successful submit.
///
/// The engine calls the handler once per successful submit and does not
/// wait on, inspect, or retry whatever it starts. A handler that needs to
/// do asynchronous work spawns it and returns.
///
/// Any `Fn(Payload) + Send + Sync` closure is a handler.
pub trait SubmitHandler: Send + Sync {
    /// Handles a validated, coerced payload.
    fn on_submit(&self, payload: Payload);
}

impl<F> SubmitHandler for F
where
    F: Fn(Payload) + Send + Sync,
{
    fn on_submit(&self, payload: Payload) {
        self(payload);
    }
}

/// The rendering layer's side channel for widgets that keep their own
/// displayed state (native date pickers).
///
/// On reset the engine resets its own value for such a field and then asks
/// the rendering layer to clear the widget itself.
///
/// Any `Fn(&str) + Send + Sync` closure can serve as the side channel.
pub trait UncontrolledInputs: Send + Sync {
    /// Clears the displayed content of the widget for `field_id`.
    fn clear(&self, field_id: &str);
}

impl<F> UncontrolledInputs for F
where
    F: Fn(&str) + Send + Sync,
{
    fn clear(&self, field_id: &str) {
        self(field_id);
    }
}

// ============================================================
// Transitions
// ============================================================

/// Returns the state of a freshly reset form: defaults everywhere, no
/// errors. Seed data is not consulted.
pub fn reset(layout: &Layout) -> FormState {
    FormState {
        values: resolve(layout, None),
        errors: FieldErrors::new(),
    }
}

/// Returns `state` with field `id` set to `value`. Errors are kept as they
/// are until the next submit.
///
/// # Errors
///
/// Returns [`FormError::UnknownField`] if `id` is not in the layout.
pub fn change_field(
    state: &FormState,
    layout: &Layout,
    id: &str,
    value: Value,
) -> FormResult<FormState> {
    if !layout.contains(id) {
        return Err(FormError::UnknownField(id.to_string()));
    }
    let mut next = state.clone();
    next.values.insert(id.to_string(), value);
    Ok(next)
}

/// Validates `state` and, when it is clean, coerces the values and calls
/// `handler` exactly once with the payload.
///
/// The returned state carries the freshly computed errors, which replace
/// the previous ones whatever the outcome. A value that passes validation
/// but still fails coercion (possible when hidden fields are not
/// validated) is recorded as that field's error and blocks the submit.
pub fn submit(
    state: &FormState,
    layout: &Layout,
    settings: &Settings,
    handler: &dyn SubmitHandler,
) -> (FormState, SubmitOutcome) {
    let mut errors = validate(&state.values, layout, settings);

    if errors.is_empty() {
        match coerce(&state.values, layout) {
            Ok(payload) => {
                tracing::info!(fields = payload.len(), "form submitted");
                handler.on_submit(payload);
                let next = FormState {
                    values: state.values.clone(),
                    errors,
                };
                return (next, SubmitOutcome::Submitted);
            }
            Err(err) => {
                tracing::warn!(field = %err.field, raw = %err.raw, "payload coercion failed");
                let message = layout.get(&err.field).map_or_else(
                    || settings.invalid_number_message.clone(),
                    |field| {
                        field.message_for(codes::INVALID_NUMBER, || {
                            settings.invalid_number_message.clone()
                        })
                    },
                );
                errors.insert(err.field, message);
            }
        }
    }

    tracing::info!(invalid = errors.len(), "form submit rejected");
    let next = FormState {
        values: state.values.clone(),
        errors: errors.clone(),
    };
    (next, SubmitOutcome::Rejected(errors))
}

/// Applies `action` to `state`.
///
/// # Errors
///
/// Returns [`FormError::UnknownField`] for a `ChangeField` naming a field
/// the layout does not have.
pub fn reduce(
    state: &FormState,
    layout: &Layout,
    action: FormAction,
    settings: &Settings,
    handler: &dyn SubmitHandler,
) -> FormResult<FormState> {
    match action {
        FormAction::Reset => Ok(reset(layout)),
        FormAction::ChangeField { id, value } => change_field(state, layout, &id, value),
        FormAction::Submit => Ok(submit(state, layout, settings, handler).0),
    }
}

// ============================================================
// FormControl
// ============================================================

/// A live form: a layout, its settings and collaborators, and the current
/// state.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use layoutform_engine::fields::{FieldDescriptor, InputKind};
/// use layoutform_engine::form::FormControl;
/// use layoutform_engine::layout::Layout;
/// use layoutform_engine::value::{Payload, Value};
///
/// let layout = Layout::new(vec![
///     FieldDescriptor::new("name", InputKind::Text).required(true),
///     FieldDescriptor::new("age", InputKind::Number),
/// ])
/// .unwrap();
///
/// let received = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&received);
/// let mut form = FormControl::new(layout, move |payload: Payload| {
///     sink.lock().unwrap().push(payload);
/// });
///
/// assert!(!form.submit().is_submitted());
/// assert_eq!(form.state().errors["name"], "Field is required");
///
/// form.change_field("name", "Ada").unwrap();
/// form.change_field("age", "36").unwrap();
/// assert!(form.submit().is_submitted());
///
/// let payloads = received.lock().unwrap();
/// assert_eq!(payloads[0]["age"], Value::Number(36.0));
/// ```
pub struct FormControl {
    layout: Layout,
    settings: Settings,
    handler: Box<dyn SubmitHandler>,
    uncontrolled: Option<Box<dyn UncontrolledInputs>>,
    registry: InputRegistry,
    span: tracing::Span,
    state: FormState,
}

impl FormControl {
    /// Creates a form over `layout` with default values and the global
    /// settings.
    pub fn new(layout: Layout, handler: impl SubmitHandler + 'static) -> Self {
        let state = reset(&layout);
        Self {
            layout,
            settings: SETTINGS.get().clone(),
            handler: Box::new(handler),
            uncontrolled: None,
            registry: InputRegistry::default(),
            span: form_span("form"),
            state,
        }
    }

    /// Seeds the initial values. Non-null seed values win over defaults;
    /// seed keys the layout does not have are dropped.
    #[must_use]
    pub fn with_seed(mut self, seed: &Values) -> Self {
        self.state = FormState {
            values: resolve(&self.layout, Some(seed)),
            errors: FieldErrors::new(),
        };
        self
    }

    /// Uses `settings` instead of the global settings. Findings of the
    /// settings checks are logged.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        for message in CheckRegistry::<Settings>::with_builtins().run_checks(None, &settings) {
            tracing::warn!(check = message.id.as_deref().unwrap_or_default(), "{}", message.msg);
        }
        self.settings = settings;
        self
    }

    /// Registers the side channel used to clear uncontrolled widgets on
    /// reset.
    #[must_use]
    pub fn with_uncontrolled_inputs(mut self, inputs: impl UncontrolledInputs + 'static) -> Self {
        self.uncontrolled = Some(Box::new(inputs));
        self
    }

    /// Uses `registry` to render fields and interpret input events.
    #[must_use]
    pub fn with_registry(mut self, registry: InputRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Names the form in log output.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.span = form_span(name);
        self
    }

    /// Returns the current state.
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the layout.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the settings in use.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the input registry in use.
    pub const fn registry(&self) -> &InputRegistry {
        &self.registry
    }

    /// Sets field `id` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `id` is not in the layout; the
    /// state is left unchanged.
    pub fn change_field(&mut self, id: &str, value: impl Into<Value>) -> FormResult<()> {
        let _guard = self.span.enter();
        let value = value.into();
        tracing::debug!(field = id, value = %value, "change field");
        self.state = change_field(&self.state, &self.layout, id, value)?;
        Ok(())
    }

    /// Routes a raw widget event through the change handler registered for
    /// the field's kind. Returns `false` if the handler rejected the event.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `id` is not in the layout.
    pub fn input(&mut self, id: &str, event: InputEvent) -> FormResult<bool> {
        let field = self
            .layout
            .get(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        match self.registry.handle(field, event, &self.settings) {
            Some(value) => {
                self.change_field(id, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Validates and, if clean, submits the payload to the handler.
    pub fn submit(&mut self) -> SubmitOutcome {
        let _guard = self.span.enter();
        let (next, outcome) = submit(&self.state, &self.layout, &self.settings, self.handler.as_ref());
        self.state = next;
        outcome
    }

    /// Restores every field to its default and clears errors, then asks the
    /// rendering layer to clear each uncontrolled widget.
    pub fn reset(&mut self) {
        let _guard = self.span.enter();
        tracing::debug!("reset");
        self.state = reset(&self.layout);
        if let Some(inputs) = &self.uncontrolled {
            for field in self.layout.uncontrolled_fields() {
                inputs.clear(&field.id);
            }
        }
    }

    /// Applies `action`. A `Reset` also clears uncontrolled widgets.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for a `ChangeField` naming a field
    /// the layout does not have.
    pub fn dispatch(&mut self, action: FormAction) -> FormResult<()> {
        match action {
            FormAction::Reset => self.reset(),
            FormAction::ChangeField { id, value } => self.change_field(&id, value)?,
            FormAction::Submit => {
                self.submit();
            }
        }
        Ok(())
    }

    /// Returns a bound field for every layout field, in layout order. The
    /// first field is marked for autofocus.
    pub fn bound_fields(&self) -> Vec<BoundField> {
        self.layout
            .iter()
            .enumerate()
            .map(|(i, field)| BoundField::new(field, &self.state.values, &self.state.errors, i == 0))
            .collect()
    }

    /// Returns the bound field for `id`.
    pub fn bound_field(&self, id: &str) -> Option<BoundField> {
        let autofocus = self.layout.first().is_some_and(|f| f.id == id);
        self.layout
            .get(id)
            .map(|field| BoundField::new(field, &self.state.values, &self.state.errors, autofocus))
    }

    /// Renders the whole form as a 10-column grid of field rows.
    pub fn render(&self) -> String {
        let rows: String = self
            .bound_fields()
            .iter()
            .map(|field| field.render_row(&self.registry))
            .collect();
        format!(
            r#"<div class="form" style="display:grid;grid-template-columns:repeat(10,1fr);">{rows}</div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::fields::{FieldDescriptor, InputKind};

    fn layout() -> Layout {
        Layout::new(vec![
            FieldDescriptor::new("name", InputKind::Text).required(true),
            FieldDescriptor::new("age", InputKind::Number),
            FieldDescriptor::new("born", InputKind::Date),
            FieldDescriptor::new("agree", InputKind::Boolean),
        ])
        .unwrap()
    }

    fn recorder() -> (Arc<Mutex<Vec<Payload>>>, impl SubmitHandler) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |payload: Payload| sink.lock().unwrap().push(payload))
    }

    #[test]
    fn test_reset_state() {
        let state = reset(&layout());
        assert_eq!(state.values.len(), 4);
        assert_eq!(state.values["agree"], Value::Bool(false));
        assert_eq!(state.values["age"], Value::from(""));
        assert!(state.is_valid());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let layout = layout();
        assert_eq!(reset(&layout), reset(&layout));
    }

    #[test]
    fn test_change_field_keeps_errors() {
        let layout = layout();
        let mut state = reset(&layout);
        state.errors.insert("name".into(), "Field is required".into());

        let next = change_field(&state, &layout, "name", Value::from("Ada")).unwrap();
        assert_eq!(next.values["name"], Value::from("Ada"));
        assert_eq!(next.errors["name"], "Field is required");
    }

    #[test]
    fn test_change_unknown_field() {
        let layout = layout();
        let state = reset(&layout);
        let result = change_field(&state, &layout, "ghost", Value::from(1));
        assert!(matches!(result, Err(FormError::UnknownField(id)) if id == "ghost"));
    }

    #[test]
    fn test_submit_rejected() {
        let layout = layout();
        let (calls, handler) = recorder();
        let (state, outcome) = submit(&reset(&layout), &layout, &Settings::default(), &handler);

        assert!(!outcome.is_submitted());
        assert_eq!(state.errors["name"], "Field is required");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_accepted() {
        let layout = layout();
        let (calls, handler) = recorder();
        let mut state = change_field(&reset(&layout), &layout, "name", Value::from("Ada")).unwrap();
        state = change_field(&state, &layout, "age", Value::from("42")).unwrap();
        state.errors.insert("name".into(), "stale".into());

        let (state, outcome) = submit(&state, &layout, &Settings::default(), &handler);
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(state.errors.is_empty());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["age"], Value::Number(42.0));
        assert_eq!(calls[0]["name"], Value::from("Ada"));
    }

    #[test]
    fn test_submit_coercion_failure_on_unvalidated_hidden_field() {
        let layout = Layout::new(vec![
            FieldDescriptor::new("skip", InputKind::Boolean).default_value(true),
            FieldDescriptor::new("qty", InputKind::Number).hide_when("skip", [true]),
        ])
        .unwrap();
        let settings = Settings {
            validate_hidden_fields: false,
            ..Settings::default()
        };
        let (calls, handler) = recorder();
        let state = change_field(&reset(&layout), &layout, "qty", Value::from("lots")).unwrap();

        let (state, outcome) = submit(&state, &layout, &settings, &handler);
        assert!(!outcome.is_submitted());
        assert_eq!(state.errors["qty"], "Enter a number");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reduce_dispatches() {
        let layout = layout();
        let settings = Settings::default();
        let (calls, handler) = recorder();

        let state = reduce(
            &FormState::default(),
            &layout,
            FormAction::Reset,
            &settings,
            &handler,
        )
        .unwrap();
        let state = reduce(
            &state,
            &layout,
            FormAction::ChangeField {
                id: "name".into(),
                value: Value::from("Ada"),
            },
            &settings,
            &handler,
        )
        .unwrap();
        let state = reduce(&state, &layout, FormAction::Submit, &settings, &handler).unwrap();

        assert!(state.is_valid());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_action_serde() {
        let action: FormAction =
            serde_json::from_str(r#"{"type": "changeField", "id": "age", "value": "4"}"#).unwrap();
        assert_eq!(
            action,
            FormAction::ChangeField {
                id: "age".into(),
                value: Value::from("4"),
            }
        );
        let reset: FormAction = serde_json::from_str(r#"{"type": "reset"}"#).unwrap();
        assert_eq!(reset, FormAction::Reset);
    }

    #[test]
    fn test_form_control_seed() {
        let seed = Values::from([("name".to_string(), Value::from("Grace"))]);
        let form = FormControl::new(layout(), |_: Payload| {}).with_seed(&seed);
        assert_eq!(form.state().values["name"], Value::from("Grace"));
        assert_eq!(form.state().values.len(), 4);
    }

    #[test]
    fn test_form_control_reset_ignores_seed() {
        let seed = Values::from([("name".to_string(), Value::from("Grace"))]);
        let mut form = FormControl::new(layout(), |_: Payload| {}).with_seed(&seed);
        form.reset();
        assert_eq!(form.state().values["name"], Value::from(""));
    }

    #[test]
    fn test_form_control_reset_clears_uncontrolled() {
        let cleared = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&cleared);
        let mut form = FormControl::new(layout(), |_: Payload| {})
            .with_uncontrolled_inputs(move |id: &str| log.lock().unwrap().push(id.to_string()));

        form.change_field("born", "2020-01-01").unwrap();
        form.reset();
        assert_eq!(form.state().values["born"], Value::from(""));
        assert_eq!(*cleared.lock().unwrap(), vec!["born".to_string()]);
    }

    #[test]
    fn test_form_control_unknown_field_leaves_state() {
        let mut form = FormControl::new(layout(), |_: Payload| {});
        let before = form.state().clone();
        assert!(form.change_field("ghost", "x").is_err());
        assert_eq!(form.state(), &before);
    }

    #[test]
    fn test_form_control_input_events() {
        let layout = Layout::new(vec![
            FieldDescriptor::new("code", InputKind::Text).max_chars(4),
            FieldDescriptor::new("agree", InputKind::Boolean),
        ])
        .unwrap();
        let mut form = FormControl::new(layout, |_: Payload| {});

        assert!(form.input("code", InputEvent::Text("AB12".into())).unwrap());
        assert!(!form.input("code", InputEvent::Text("AB123".into())).unwrap());
        assert_eq!(form.state().values["code"], Value::from("AB12"));

        assert!(form.input("agree", InputEvent::Checked(true)).unwrap());
        assert_eq!(form.state().values["agree"], Value::Bool(true));

        assert!(form.input("ghost", InputEvent::Checked(true)).is_err());
    }

    #[test]
    fn test_form_control_dispatch() {
        let mut form = FormControl::new(layout(), |_: Payload| {});
        form.dispatch(FormAction::ChangeField {
            id: "name".into(),
            value: Value::from("x"),
        })
        .unwrap();
        form.dispatch(FormAction::Submit).unwrap();
        assert!(form.state().is_valid());
        form.dispatch(FormAction::Reset).unwrap();
        assert_eq!(form.state().values["name"], Value::from(""));
    }

    #[test]
    fn test_bound_fields_autofocus_first() {
        let form = FormControl::new(layout(), |_: Payload| {});
        let fields = form.bound_fields();
        assert_eq!(fields.len(), 4);
        assert!(fields[0].autofocus);
        assert!(fields[1..].iter().all(|f| !f.autofocus));
        assert!(form.bound_field("name").unwrap().autofocus);
        assert!(!form.bound_field("age").unwrap().autofocus);
        assert!(form.bound_field("ghost").is_none());
    }

    #[test]
    fn test_render_contains_every_field() {
        let form = FormControl::new(layout(), |_: Payload| {}).with_name("signup");
        let html = form.render();
        for id in ["name", "age", "born", "agree"] {
            assert!(html.contains(&format!(r#"name="{id}""#)), "missing {id}");
        }
    }
}
