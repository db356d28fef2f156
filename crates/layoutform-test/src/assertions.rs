//! Assertion helpers for form state.
//!
//! Each helper panics with a message that shows the offending state, so a
//! failing test explains itself without extra `dbg!` calls.

use std::collections::BTreeSet;

use layoutform_engine::form::FormState;
use layoutform_engine::layout::Layout;
use layoutform_engine::value::Value;

/// Asserts that `field` has exactly the error `expected`.
///
/// # Panics
///
/// Panics if the field has no error or a different one.
pub fn assert_field_error(state: &FormState, field: &str, expected: &str) {
    match state.errors.get(field) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Expected error '{expected}' for field '{field}', got '{actual}'"
        ),
        None => panic!(
            "Expected error '{expected}' for field '{field}', but it has none. Errors: {:?}",
            state.errors
        ),
    }
}

/// Asserts that no field has an error.
///
/// # Panics
///
/// Panics if the error map is not empty.
pub fn assert_no_errors(state: &FormState) {
    assert!(
        state.errors.is_empty(),
        "Expected no errors, got {:?}",
        state.errors
    );
}

/// Asserts that `field` currently holds `expected`.
///
/// # Panics
///
/// Panics if the value differs or the field is absent.
pub fn assert_value(state: &FormState, field: &str, expected: impl Into<Value>) {
    let expected = expected.into();
    assert_eq!(
        state.values.get(field),
        Some(&expected),
        "Expected '{field}' = {expected:?}, values: {:?}",
        state.values
    );
}

/// Asserts that the state holds exactly one value per layout field and no
/// others.
///
/// # Panics
///
/// Panics if the key set of `state.values` differs from the layout's ids.
pub fn assert_bijection(state: &FormState, layout: &Layout) {
    let held: BTreeSet<&str> = state.values.keys().map(String::as_str).collect();
    let declared: BTreeSet<&str> = layout.ids().collect();
    assert_eq!(
        held, declared,
        "Form values and layout fields differ.\n  missing: {:?}\n  extra: {:?}",
        declared.difference(&held).collect::<Vec<_>>(),
        held.difference(&declared).collect::<Vec<_>>()
    );
}
