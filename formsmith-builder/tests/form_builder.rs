//! End-to-end behavior of a rendered form: submit, reset, and debounced
//! change callbacks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use formsmith_builder::{demo_schema, FormBuilder, SubmitOutcome};
use formsmith_config::FormsConfig;
use formsmith_fields::{FieldDefinition, FieldShape, FieldValue, NumberValidation, ValidationBase};

const DELAY: Duration = Duration::from_millis(300);

fn age_form() -> FormBuilder {
    FormBuilder::new(vec![FieldDefinition::with_id(
        "age",
        "Age",
        FieldShape::Number {
            validation: NumberValidation {
                base: ValidationBase {
                    required: true,
                    error_messages: None,
                },
                min: Some(18.0),
                max: Some(60.0),
            },
        },
    )
    .default_value(20.0)])
}

#[test]
fn age_below_minimum_is_rejected_and_default_is_accepted() {
    let mut form = age_form();

    form.on_field_change("age", "15");
    let SubmitOutcome::Rejected(errors) = form.on_submit() else {
        panic!("15 should be rejected");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("age"));

    form.on_field_change("age", "20");
    let outcome = form.on_submit();
    assert!(outcome.is_accepted());
    assert!(form.state().errors().is_empty());
}

#[test]
fn submit_is_idempotent() {
    let mut form = FormBuilder::new(demo_schema());
    form.on_field_change("age", "70");

    let first = form.on_submit();
    let first_errors = form.state().errors().clone();
    let second = form.on_submit();

    assert_eq!(first, second);
    assert_eq!(&first_errors, form.state().errors());
    assert_eq!(first_errors.len(), 2);
}

#[test]
fn accepted_submit_carries_the_values() {
    let mut form = FormBuilder::new(demo_schema());
    form.on_field_change("name", "Grace");

    let SubmitOutcome::Accepted(values) = form.on_submit() else {
        panic!("demo defaults plus a name should pass");
    };
    assert_eq!(values["name"], FieldValue::from("Grace"));
    assert_eq!(values["age"], FieldValue::Number(20.0));
    assert_eq!(values["country"], FieldValue::from("India"));
}

#[test]
fn reset_restores_defaults_and_clears_errors() {
    let mut form = FormBuilder::new(demo_schema());
    form.on_field_change("name", "x");
    form.on_field_change("age", "100");
    form.on_field_change("country", "Canada");
    form.on_field_change("gender", "Male");
    assert!(!form.on_submit().is_accepted());

    form.on_reset();

    assert!(form.state().errors().is_empty());
    for field in demo_schema() {
        assert_eq!(
            form.state().value(field.id.as_str()),
            Some(&field.default_value)
        );
    }
}

type LastValue = Arc<Mutex<Option<FieldValue>>>;

fn counting_callback() -> (
    Arc<AtomicUsize>,
    LastValue,
    impl Fn(FieldValue) + Send + Sync + 'static,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));
    let (c, l) = (Arc::clone(&calls), Arc::clone(&last));
    let callback = move |value: FieldValue| {
        c.fetch_add(1, Ordering::SeqCst);
        *l.lock().unwrap() = Some(value);
    };
    (calls, last, callback)
}

#[tokio::test(start_paused = true)]
async fn rapid_changes_invoke_callback_once_with_last_value() {
    let (calls, last, callback) = counting_callback();
    let mut form = age_form().with_change_delay(DELAY).on_change("age", callback);

    for raw in ["2", "25", "253", "25", "26"] {
        form.on_field_change("age", raw);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(DELAY * 2).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*last.lock().unwrap(), Some(FieldValue::Number(26.0)));
    assert_eq!(form.state().value("age"), Some(&FieldValue::Number(26.0)));
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_callback() {
    let (calls, _last, callback) = counting_callback();
    let mut form = age_form().on_change_after("age", DELAY, callback);

    form.on_field_change("age", "30");
    form.teardown();
    tokio::time::sleep(DELAY * 2).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_form_cancels_pending_callback() {
    let (calls, _last, callback) = counting_callback();
    let mut form = age_form().on_change_shared("age", Arc::new(callback));

    form.on_field_change("age", "30");
    drop(form);
    tokio::time::sleep(DELAY * 2).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn configured_change_delay_drives_callbacks() {
    let config = FormsConfig {
        field_change_debounce_ms: 50,
        ..FormsConfig::default()
    };
    let (calls, last, callback) = counting_callback();
    let mut form = FormBuilder::from_config(age_form().fields().to_vec(), &config)
        .on_change("age", callback);

    form.on_field_change("age", "40");
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*last.lock().unwrap(), Some(FieldValue::Number(40.0)));
}
