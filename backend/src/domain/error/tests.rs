//! Tests for the error payload and its trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn age_violation() -> Violation {
    Violation::new(
        FieldSource::Body,
        "age",
        "range",
        "age must be greater than 0 and at most 115",
    )
}

#[rstest]
fn constructors_set_codes() {
    assert_eq!(Error::not_found("gone").code(), ErrorCode::NotFound);
    assert_eq!(Error::internal("boom").code(), ErrorCode::InternalError);
    assert_eq!(Error::validation(vec![]).code(), ErrorCode::ValidationFailed);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn validation_error_lists_violations_in_details(age_violation: Violation) {
    let error = Error::validation(vec![age_violation.clone()]);

    assert_eq!(error.message(), "request validation failed");
    assert_eq!(error.violations(), vec![age_violation]);
    assert_eq!(
        error.details(),
        Some(&json!({
            "violations": [{
                "location": "body",
                "field": "age",
                "code": "range",
                "message": "age must be greater than 0 and at most 115",
            }]
        }))
    );
}

#[rstest]
fn unattributed_violation_omits_field() {
    let violation = Violation::unattributed(FieldSource::Body, "decode", "EOF while parsing");
    let value = serde_json::to_value(&violation).expect("violation serialises");

    assert!(value.get("field").is_none());
    assert_eq!(value.get("code"), Some(&json!("decode")));
}

#[rstest]
fn violations_is_empty_for_other_errors() {
    assert!(Error::not_found("missing").violations().is_empty());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(expected_trace_id: String) {
    let error = Error::not_found("missing").with_trace_id(expected_trace_id.clone());
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "message": "missing",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
fn round_trips_through_json(age_violation: Violation) {
    let error = Error::validation(vec![age_violation]).with_trace_id(TRACE_ID);
    let encoded = serde_json::to_string(&error).expect("error serialises");
    let decoded: Error = serde_json::from_str(&encoded).expect("error deserialises");

    assert_eq!(decoded, error);
}
