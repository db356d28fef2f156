//! End-to-end tests of the test harness against real forms.
//!
//! Exercises the outbox, clear log, and assertions the way downstream test
//! suites use them: through a `FormControl` built from the fixtures.

use layoutform_engine::form::FormControl;
use layoutform_engine::value::Value;
use layoutform_test::fixtures::{conditional_layout, contact_layout, every_kind_layout};
use layoutform_test::{
    assert_bijection, assert_field_error, assert_no_errors, assert_value, ClearLog,
    SettingsOverride, SubmissionOutbox,
};

#[test]
fn test_contact_form_round() {
    let outbox = SubmissionOutbox::new();
    let mut form = FormControl::new(contact_layout(), outbox.clone());

    form.submit();
    assert_field_error(form.state(), "name", "Field is required");
    outbox.assert_count(0);

    form.change_field("name", "Grace").unwrap();
    form.change_field("age", "85").unwrap();
    form.change_field("subscribe", true).unwrap();
    form.submit();

    assert_no_errors(form.state());
    outbox.assert_count(1);
    outbox.assert_last_value("age", 85);
    outbox.assert_last_value("subscribe", true);
}

#[test]
fn test_clear_log_sees_only_date_fields() {
    let layout = every_kind_layout();
    let log = ClearLog::new();
    let mut form = FormControl::new(layout.clone(), SubmissionOutbox::new())
        .with_uncontrolled_inputs(log.clone());

    form.change_field("date", "2024-12-24").unwrap();
    form.reset();

    assert_eq!(log.cleared(), vec!["date".to_string()]);
    assert_value(form.state(), "date", "");
    assert_bijection(form.state(), &layout);
}

#[test]
fn test_conditional_form_with_lenient_settings() {
    let outbox = SubmissionOutbox::new();
    let mut form = FormControl::new(conditional_layout(), outbox.clone())
        .with_settings(SettingsOverride::new().validate_hidden_fields(false).build());

    form.submit();
    outbox.assert_count(1);

    form.change_field("subscribe", true).unwrap();
    form.submit();
    assert_field_error(form.state(), "email", "Field is required");
    outbox.assert_count(1);

    form.change_field("email", "grace@example.com").unwrap();
    form.submit();
    outbox.assert_count(2);
    outbox.assert_last_value("email", Value::from("grace@example.com"));
}

#[tokio::test]
async fn test_outbox_shared_with_spawned_forms() {
    let outbox = SubmissionOutbox::new();

    let tasks: Vec<_> = ["Ada", "Grace", "Hedy"]
        .into_iter()
        .map(|name| {
            let outbox = outbox.clone();
            tokio::spawn(async move {
                let mut form = FormControl::new(contact_layout(), outbox);
                form.change_field("name", name).unwrap();
                form.submit().is_submitted()
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap());
    }
    outbox.assert_count(3);
}
