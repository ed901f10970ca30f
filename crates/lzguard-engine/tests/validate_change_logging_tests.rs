//! Boundary logging of validation runs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{baseline, endpoint_vpc};
use lzguard_core::guard::CATALOG;
use lzguard_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use lzguard_core::options::GuardOptions;
use lzguard_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use lzguard_core_types::{RequestContext, RequestId};
use lzguard_engine::validate_change_with;
use serde_json::json;

fn events_for_request(request_id: &str) -> Vec<CapturedEvent> {
    init_test_capture()
        .events_for_op("validate_change")
        .into_iter()
        .filter(|e| e.field("request_id") == Some(request_id))
        .collect()
}

fn context(request_id: &str) -> RequestContext {
    RequestContext::with_request_id(RequestId::from_string(request_id.to_string()))
}

#[test]
fn test_accepted_run_logs_start_and_end() {
    init_test_capture();
    let previous = baseline();

    validate_change_with(
        &previous,
        &previous,
        CATALOG,
        &GuardOptions::default(),
        &context("req-log-accepted"),
    )
    .unwrap();

    let events = events_for_request("req-log-accepted");
    let kinds: Vec<Option<&str>> = events.iter().map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![Some(EVENT_START), Some(EVENT_END)]);

    let end = &events[1];
    assert_eq!(end.field("verdict"), Some("Accepted"));
    assert_eq!(end.field("violation_count"), Some("0"));
    assert_eq!(end.field("diff_len"), Some("0"));
    assert!(end.field("duration_ms").is_some());
}

#[test]
fn test_rejected_run_logs_counts() {
    init_test_capture();
    let previous = baseline();
    let mut current = previous.clone();
    endpoint_vpc(&mut current)["cidr"][0]["value"] = json!("10.3.0.0/16");

    validate_change_with(
        &previous,
        &current,
        CATALOG,
        &GuardOptions::default(),
        &context("req-log-rejected"),
    )
    .unwrap();

    let end = events_for_request("req-log-rejected")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("end event");
    assert_eq!(end.field("verdict"), Some("Rejected"));
    assert_eq!(end.field("violation_count"), Some("1"));
    assert_eq!(end.field("diff_len"), Some("1"));
}

#[test]
fn test_failed_run_logs_error_instead_of_end() {
    init_test_capture();
    let previous = baseline();
    let mut current = previous.clone();
    current["organizational-units"] = json!([]);

    validate_change_with(
        &previous,
        &current,
        CATALOG,
        &GuardOptions::default(),
        &context("req-log-failed"),
    )
    .unwrap_err();

    let events = events_for_request("req-log-failed");
    let kinds: Vec<Option<&str>> = events.iter().map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![Some(EVENT_START), Some(EVENT_END_ERROR)]);
    assert_eq!(events[1].field("err_code"), Some("ERR_DECODE_FAILED"));
    assert_eq!(events[1].field("field_error_count"), Some("1"));
}

#[test]
fn test_account_emails_not_logged_during_run() {
    let capture = init_test_capture();
    let previous = baseline();
    let mut current = previous.clone();
    current["workload-account-configs"]["dev"]["email"] = json!("operations@example.com");

    validate_change_with(
        &previous,
        &current,
        CATALOG,
        &GuardOptions::default(),
        &context("req-log-emails"),
    )
    .unwrap();

    capture.assert_never_logged("operations@example.com");
}
