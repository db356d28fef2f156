//! Capture of submitted payloads.
//!
//! [`SubmissionOutbox`] is a [`SubmitHandler`] that stores every payload it
//! receives instead of acting on it, so tests can assert on exactly what a
//! form submitted and how often.
//!
//! ## Example
//!
//! ```rust
//! use layoutform_engine::fields::{FieldDescriptor, InputKind};
//! use layoutform_engine::form::FormControl;
//! use layoutform_engine::layout::Layout;
//! use layoutform_engine::value::Value;
//! use layoutform_test::submission_outbox::SubmissionOutbox;
//!
//! let layout = Layout::new(vec![FieldDescriptor::new("age", InputKind::Number)]).unwrap();
//! let outbox = SubmissionOutbox::new();
//! let mut form = FormControl::new(layout, outbox.clone());
//!
//! form.change_field("age", "7").unwrap();
//! form.submit();
//!
//! outbox.assert_count(1);
//! assert_eq!(outbox.last_payload().unwrap()["age"], Value::Number(7.0));
//! ```

use std::sync::{Arc, Mutex};

use layoutform_engine::form::{SubmitHandler, UncontrolledInputs};
use layoutform_engine::value::{Payload, Value};

/// An in-memory submit handler that records every payload.
///
/// Clones share the same storage, so one clone can be handed to a form
/// while another is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionOutbox {
    payloads: Arc<Mutex<Vec<Payload>>>,
}

impl SubmissionOutbox {
    /// Creates a new empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded payload, oldest first.
    pub fn payloads(&self) -> Vec<Payload> {
        self.payloads
            .lock()
            .expect("SubmissionOutbox lock poisoned")
            .clone()
    }

    /// Returns the number of recorded payloads.
    pub fn len(&self) -> usize {
        self.payloads
            .lock()
            .expect("SubmissionOutbox lock poisoned")
            .len()
    }

    /// Returns `true` if nothing has been submitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every recorded payload.
    pub fn clear(&self) {
        self.payloads
            .lock()
            .expect("SubmissionOutbox lock poisoned")
            .clear();
    }

    /// Returns the most recent payload, if any.
    pub fn last_payload(&self) -> Option<Payload> {
        self.payloads
            .lock()
            .expect("SubmissionOutbox lock poisoned")
            .last()
            .cloned()
    }

    /// Asserts that exactly `expected` payloads were submitted.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, expected: usize) {
        let actual = self.len();
        assert_eq!(
            actual, expected,
            "Expected {expected} submission(s), but {actual} were made"
        );
    }

    /// Asserts that the most recent payload holds `expected` for `field`.
    ///
    /// # Panics
    ///
    /// Panics if nothing was submitted or the value differs.
    pub fn assert_last_value(&self, field: &str, expected: impl Into<Value>) {
        let expected = expected.into();
        let payload = self
            .last_payload()
            .unwrap_or_else(|| panic!("Expected a submission with '{field}', but none was made"));
        assert_eq!(
            payload.get(field),
            Some(&expected),
            "Expected '{field}' = {expected:?} in the last payload: {payload:?}"
        );
    }
}

impl SubmitHandler for SubmissionOutbox {
    fn on_submit(&self, payload: Payload) {
        self.payloads
            .lock()
            .expect("SubmissionOutbox lock poisoned")
            .push(payload);
    }
}

/// An [`UncontrolledInputs`] side channel that records which widgets the
/// form asked to clear.
#[derive(Debug, Clone, Default)]
pub struct ClearLog {
    cleared: Arc<Mutex<Vec<String>>>,
}

impl ClearLog {
    /// Creates a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cleared field ids, in call order.
    pub fn cleared(&self) -> Vec<String> {
        self.cleared.lock().expect("ClearLog lock poisoned").clone()
    }

    /// Returns the number of clear calls.
    pub fn len(&self) -> usize {
        self.cleared.lock().expect("ClearLog lock poisoned").len()
    }

    /// Returns `true` if nothing was cleared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UncontrolledInputs for ClearLog {
    fn clear(&self, field_id: &str) {
        self.cleared
            .lock()
            .expect("ClearLog lock poisoned")
            .push(field_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, Value)]) -> Payload {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_outbox_records_payloads() {
        let outbox = SubmissionOutbox::new();
        assert!(outbox.is_empty());

        outbox.on_submit(payload(&[("a", Value::from(1))]));
        outbox.on_submit(payload(&[("a", Value::from(2))]));

        outbox.assert_count(2);
        outbox.assert_last_value("a", 2);
        assert_eq!(outbox.payloads()[0]["a"], Value::from(1));
    }

    #[test]
    fn test_outbox_clones_share_storage() {
        let outbox = SubmissionOutbox::new();
        let handle = outbox.clone();
        handle.on_submit(Payload::new());
        assert_eq!(outbox.len(), 1);
        outbox.clear();
        assert!(handle.is_empty());
    }

    #[test]
    #[should_panic(expected = "Expected 1 submission(s), but 0 were made")]
    fn test_outbox_assert_count_fails() {
        SubmissionOutbox::new().assert_count(1);
    }

    #[test]
    #[should_panic(expected = "none was made")]
    fn test_outbox_assert_last_value_without_submission() {
        SubmissionOutbox::new().assert_last_value("a", 1);
    }

    #[test]
    fn test_clear_log() {
        let log = ClearLog::new();
        log.clear("born");
        log.clear("due");
        assert_eq!(log.cleared(), vec!["born".to_string(), "due".to_string()]);
        assert_eq!(log.len(), 2);
    }
}
