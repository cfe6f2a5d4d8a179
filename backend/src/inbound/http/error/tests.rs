//! Tests for the error envelope and its HTTP mapping.

use actix_web::ResponseError;
use actix_web::http::StatusCode;
use constraints::{ValidationError, ValidationErrors};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::inbound::http::test_utils::{FixtureClock, json_body};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn clock() -> FixtureClock {
    FixtureClock::standard()
}

fn validation_failure() -> Error {
    let errors = ValidationErrors::from_vec(vec![
        ValidationError::new("name", "name is required"),
        ValidationError::new("age", "age must not be greater than 120").with_value(json!(130)),
    ])
    .expect("non-empty list");
    Error::validation(errors)
}

#[rstest]
#[case(Error::forbidden(), StatusCode::FORBIDDEN)]
#[case(Error::missing_permission("clients:read"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Client"), StatusCode::NOT_FOUND)]
#[case(Error::invalid_field("email", "email is required"), StatusCode::UNPROCESSABLE_ENTITY)]
fn response_status_follows_the_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
    assert_eq!(status.as_u16(), error.code().status_code());
}

#[rstest]
fn not_found_envelope_matches_the_wire_format(clock: FixtureClock) {
    let envelope = ErrorResponse::format(&Error::not_found_with_id("Client", 42), &clock);

    insta::assert_json_snapshot!(envelope, @r#"
    {
      "statusCode": 404,
      "error": "RESOURCE_NOT_FOUND",
      "message": "Client with identifier '42' not found",
      "timestamp": "2026-03-01T09:30:00.250Z",
      "resource": "Client",
      "identifier": "42"
    }
    "#);
}

#[rstest]
fn validation_envelope_lists_every_violation(clock: FixtureClock) {
    let envelope = ErrorResponse::format(&validation_failure(), &clock);
    let value = serde_json::to_value(&envelope).expect("envelope serialises");

    assert_eq!(
        value,
        json!({
            "statusCode": 422,
            "error": "VALIDATION_ERROR",
            "message": "Validation failed",
            "timestamp": "2026-03-01T09:30:00.250Z",
            "errors": [
                {"field": "name", "message": "name is required"},
                {"field": "age", "message": "age must not be greater than 120", "value": 130},
            ],
        })
    );
}

#[rstest]
#[case(Error::forbidden())]
#[case(Error::missing_permission("subscriptions:write"))]
#[case(Error::not_found("Plan"))]
#[case(Error::not_found_with_id("Client", "3fa85f64-5717-4562-b3fc-2c963f66afa6"))]
#[case(validation_failure())]
fn envelopes_survive_a_round_trip(#[case] error: Error, clock: FixtureClock) {
    let envelope = ErrorResponse::format(&error, &clock);
    let json = serde_json::to_string(&envelope).expect("envelope serialises");
    let parsed: ErrorResponse = serde_json::from_str(&json).expect("envelope parses");

    assert_eq!(parsed, envelope);
    assert_eq!(parsed.status_code(), error.code().status_code());
    assert_eq!(parsed.details(), &ErrorDetails::from(error.kind()));
}

#[rstest]
fn authorization_envelope_omits_absent_permission(clock: FixtureClock) {
    let value = serde_json::to_value(ErrorResponse::format(&Error::forbidden(), &clock))
        .expect("envelope serialises");
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("You do not have permission to perform this action")
    );
    assert!(value.get("requiredPermission").is_none());
}

#[rstest]
#[case::status_mismatch(
    json!({"statusCode": 400, "error": "RESOURCE_NOT_FOUND", "message": "gone",
           "timestamp": "2026-03-01T09:30:00.000Z", "resource": "Client"}),
    "does not match"
)]
#[case::missing_resource(
    json!({"statusCode": 404, "error": "RESOURCE_NOT_FOUND", "message": "gone",
           "timestamp": "2026-03-01T09:30:00.000Z"}),
    "missing resource"
)]
#[case::foreign_field(
    json!({"statusCode": 403, "error": "AUTHORIZATION_ERROR", "message": "no",
           "timestamp": "2026-03-01T09:30:00.000Z", "resource": "Client"}),
    "must not carry resource"
)]
#[case::empty_errors(
    json!({"statusCode": 422, "error": "VALIDATION_ERROR", "message": "bad",
           "timestamp": "2026-03-01T09:30:00.000Z", "errors": []}),
    "missing errors"
)]
#[case::unknown_code(
    json!({"statusCode": 500, "error": "INTERNAL_ERROR", "message": "boom",
           "timestamp": "2026-03-01T09:30:00.000Z"}),
    "unknown variant"
)]
#[case::bad_timestamp(
    json!({"statusCode": 403, "error": "AUTHORIZATION_ERROR", "message": "no",
           "timestamp": "yesterday"}),
    "RFC 3339"
)]
fn malformed_envelopes_are_rejected(#[case] input: Value, #[case] expected: &str) {
    let err = serde_json::from_value::<ErrorResponse>(input).expect_err("envelope is invalid");
    assert!(
        err.to_string().contains(expected),
        "unexpected error: {err}"
    );
}

#[rstest]
#[actix_web::test]
async fn response_carries_trace_header_inside_a_request_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    let response = TraceId::scope(trace_id, async {
        ResponseError::error_response(&Error::missing_permission("clients:write"))
    })
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));

    let body = json_body(response.into_body()).await;
    assert_eq!(body["statusCode"], json!(403));
    assert_eq!(body["error"], json!("AUTHORIZATION_ERROR"));
    assert_eq!(body["requiredPermission"], json!("clients:write"));
    assert_eq!(
        body["message"],
        json!("Missing required permission: clients:write")
    );
    assert!(body["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));
}

#[rstest]
#[actix_web::test]
async fn response_outside_a_request_scope_has_no_trace_header() {
    let response = ResponseError::error_response(&Error::not_found("Client"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[given("a resource-not-found error code")]
fn a_resource_not_found_error_code() -> ErrorCode {
    ErrorCode::ResourceNotFound
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 404 Not Found")]
fn the_status_is_404_not_found(status: StatusCode) {
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
fn mapping_a_not_found_code() {
    let code = a_resource_not_found_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_404_not_found(status);
}
