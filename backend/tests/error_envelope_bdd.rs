//! Behaviour tests for the canonical error envelope.
//!
//! Failures are raised the way handlers raise them, formatted through the
//! HTTP adapter and parsed back through the strict envelope reader.

use std::sync::Mutex;

use backend::domain::{ClientDraft, Error, ErrorCode};
use backend::inbound::http::error::{ErrorDetails, ErrorResponse};
use backend::inbound::http::validation::{ShapeError, accept_shape};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

#[derive(Debug, Default)]
struct EnvelopeWorld {
    failure: Option<Error>,
    envelope: Option<ErrorResponse>,
}

#[fixture]
fn world() -> Mutex<EnvelopeWorld> {
    Mutex::new(EnvelopeWorld::default())
}

fn envelope(world: &Mutex<EnvelopeWorld>) -> ErrorResponse {
    world
        .lock()
        .expect("world lock")
        .envelope
        .clone()
        .expect("envelope formatted")
}

#[given("a client lookup for identifier 42 that found nothing")]
fn a_missing_client(world: &Mutex<EnvelopeWorld>) {
    world.lock().expect("world lock").failure = Some(Error::not_found_with_id("Client", 42));
}

#[given("a registration missing its name with an invalid email")]
fn an_invalid_registration(world: &Mutex<EnvelopeWorld>) {
    let ShapeError::Rejected(failure) =
        accept_shape::<ClientDraft>(&json!({"email": "not-an-email"}))
            .expect_err("registration is invalid")
    else {
        panic!("client registration shape failed to build");
    };
    world.lock().expect("world lock").failure = Some(failure);
}

#[when("the failure is formatted as an envelope")]
fn format_the_failure(world: &Mutex<EnvelopeWorld>) {
    let mut world = world.lock().expect("world lock");
    let failure = world.failure.as_ref().expect("failure raised");
    let envelope = ErrorResponse::format(failure, &DefaultClock);
    world.envelope = Some(envelope);
}

#[then("the envelope status is 404 with code RESOURCE_NOT_FOUND")]
fn status_is_not_found(world: &Mutex<EnvelopeWorld>) {
    let envelope = envelope(world);
    assert_eq!(envelope.status_code(), 404);
    assert_eq!(envelope.code(), ErrorCode::ResourceNotFound);
}

#[then("the envelope status is 422 with code VALIDATION_ERROR")]
fn status_is_validation(world: &Mutex<EnvelopeWorld>) {
    let envelope = envelope(world);
    assert_eq!(envelope.status_code(), 422);
    assert_eq!(envelope.code(), ErrorCode::ValidationError);
}

#[then("the envelope message names client 42")]
fn message_names_the_client(world: &Mutex<EnvelopeWorld>) {
    assert_eq!(
        envelope(world).message(),
        "Client with identifier '42' not found"
    );
}

#[then("the envelope lists the name and email violations")]
fn lists_both_violations(world: &Mutex<EnvelopeWorld>) {
    let ErrorDetails::Validation { errors } = envelope(world).details().clone() else {
        panic!("expected validation details");
    };
    let fields: Vec<_> = errors.iter().map(|error| error.field.clone()).collect();
    assert_eq!(fields, vec!["fullName", "email"]);
}

#[then("the envelope parses back to the same failure")]
fn parses_back(world: &Mutex<EnvelopeWorld>) {
    let envelope = envelope(world);
    let json = serde_json::to_string(&envelope).expect("envelope serialises");
    let parsed: ErrorResponse = serde_json::from_str(&json).expect("envelope parses");
    assert_eq!(parsed, envelope);
}

#[scenario(path = "tests/features/error_envelope.feature", index = 0)]
fn missing_client_envelope(world: Mutex<EnvelopeWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/error_envelope.feature", index = 1)]
fn validation_envelope(world: Mutex<EnvelopeWorld>) {
    drop(world);
}
