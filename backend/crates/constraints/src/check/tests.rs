//! Behavioural coverage for the constraint checker.

use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

use super::*;
use crate::spec::{Coercion, FieldKind, Format};

#[fixture]
fn member_spec() -> ConstraintSpec {
    ConstraintSpec::builder()
        .field(
            FieldSpec::required("name")
                .kind(FieldKind::String)
                .min_length(1)
                .max_length(80),
        )
        .field(
            FieldSpec::optional("email")
                .kind(FieldKind::String)
                .format(Format::Email),
        )
        .field(
            FieldSpec::optional("age")
                .coerce(Coercion::Number)
                .kind(FieldKind::Integer)
                .min(14.0)
                .max(120.0),
        )
        .field(
            FieldSpec::optional("plan")
                .kind(FieldKind::String)
                .one_of(["monthly", "quarterly", "annual"]),
        )
        .field(
            FieldSpec::optional("newsletter")
                .coerce(Coercion::Boolean)
                .kind(FieldKind::Boolean),
        )
        .build()
        .expect("member spec is consistent")
}

#[derive(Debug, Deserialize, PartialEq)]
struct Member {
    name: String,
    email: Option<String>,
    age: Option<u8>,
    plan: Option<String>,
    newsletter: Option<bool>,
}

#[rstest]
fn accepts_valid_input(member_spec: ConstraintSpec) {
    let accepted = check(
        &json!({ "name": "Ada", "email": "ada@gym.example", "age": 36 }),
        &member_spec,
    )
    .expect("input satisfies the spec");

    assert_eq!(accepted.get("name"), Some(&json!("Ada")));
    assert_eq!(accepted.get("age"), Some(&json!(36)));
}

#[rstest]
fn optional_absent_fields_produce_no_errors(member_spec: ConstraintSpec) {
    let result = check(&json!({ "name": "Ada" }), &member_spec);
    assert!(result.is_ok());
}

#[rstest]
fn optional_null_fields_are_treated_as_absent(member_spec: ConstraintSpec) {
    let accepted = check(&json!({ "name": "Ada", "email": null }), &member_spec)
        .expect("null optional field is skipped");
    assert!(accepted.get("email").is_none());
}

#[rstest]
fn invalid_email_reports_one_error_for_the_field(member_spec: ConstraintSpec) {
    let errors = check(
        &json!({ "name": "Ada", "email": "not-an-email" }),
        &member_spec,
    )
    .expect_err("email is malformed");

    assert_eq!(errors.as_slice().len(), 1);
    let error = errors.for_field("email").expect("email violation present");
    assert_eq!(error.field, "email");
    assert_eq!(error.message, "email must be a valid email address");
    assert_eq!(error.value, Some(json!("not-an-email")));
}

#[rstest]
fn reports_every_invalid_field_in_one_pass(member_spec: ConstraintSpec) {
    let errors = check(&json!({ "age": 200 }), &member_spec)
        .expect_err("name is missing and age is out of range");

    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, ["name", "age"]);

    let name = errors.for_field("name").expect("name violation");
    assert_eq!(name.message, "name is required");
    assert!(name.value.is_none());

    let age = errors.for_field("age").expect("age violation");
    assert_eq!(age.message, "age must not be greater than 120");
    assert_eq!(age.value, Some(json!(200)));
}

#[rstest]
#[case(json!({ "name": "" }), "name", "name must be at least 1 character")]
#[case(json!({ "name": 12 }), "name", "name must be a string")]
#[case(json!({ "name": "Ada", "age": 9 }), "age", "age must not be less than 14")]
#[case(json!({ "name": "Ada", "age": "old" }), "age", "age must be an integer")]
#[case(json!({ "name": "Ada", "age": 30.5 }), "age", "age must be an integer")]
#[case(
    json!({ "name": "Ada", "plan": "weekly" }),
    "plan",
    "plan must be one of: monthly, quarterly, annual"
)]
#[case(
    json!({ "name": "Ada", "newsletter": "maybe" }),
    "newsletter",
    "newsletter must be a boolean"
)]
fn single_rule_violations_use_default_messages(
    member_spec: ConstraintSpec,
    #[case] input: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    let errors = check(&input, &member_spec).expect_err("input violates one rule");
    assert_eq!(errors.as_slice().len(), 1);
    let error = errors.for_field(field).expect("violation for expected field");
    assert_eq!(error.message, message);
}

#[rstest]
fn declared_coercions_run_before_range_checks(member_spec: ConstraintSpec) {
    let accepted = check(
        &json!({ "name": "Ada", "age": "36", "newsletter": "true" }),
        &member_spec,
    )
    .expect("coerced values satisfy the spec");

    assert_eq!(accepted.get("age"), Some(&json!(36)));
    assert_eq!(accepted.get("newsletter"), Some(&json!(true)));
}

#[rstest]
fn coerced_values_still_face_range_checks(member_spec: ConstraintSpec) {
    let errors = check(&json!({ "name": "Ada", "age": "7" }), &member_spec)
        .expect_err("coerced age is below the minimum");
    let age = errors.for_field("age").expect("age violation");
    assert_eq!(age.message, "age must not be less than 14");
    assert_eq!(age.value, Some(json!("7")));
}

#[rstest]
fn undeclared_fields_are_never_coerced() {
    let spec = ConstraintSpec::builder()
        .field(FieldSpec::required("count").kind(FieldKind::Integer))
        .build()
        .expect("spec is consistent");

    let errors = check(&json!({ "count": "3" }), &spec).expect_err("no coercion declared");
    assert_eq!(
        errors.for_field("count").map(|error| error.message.as_str()),
        Some("count must be an integer")
    );
}

#[rstest]
fn unknown_fields_are_ignored_and_dropped(member_spec: ConstraintSpec) {
    let accepted = check(
        &json!({ "name": "Ada", "favouriteMachine": "rower" }),
        &member_spec,
    )
    .expect("extra fields do not fail the check");
    assert!(accepted.get("favouriteMachine").is_none());
}

#[rstest]
#[case(json!([1, 2, 3]))]
#[case(json!("Ada"))]
#[case(Value::Null)]
fn non_object_input_is_a_single_body_error(member_spec: ConstraintSpec, #[case] input: Value) {
    let errors = check(&input, &member_spec).expect_err("input is not an object");
    assert_eq!(errors.as_slice().len(), 1);
    assert_eq!(errors.as_slice()[0].field, BODY_FIELD);
}

#[rstest]
#[case(json!({ "name": "Ada" }))]
#[case(json!({}))]
#[case(json!({ "name": "", "age": "x", "plan": 3 }))]
#[case(json!({ "name": "Ada", "age": 50, "plan": "annual", "newsletter": false }))]
fn result_is_exclusively_accepted_or_rejected(member_spec: ConstraintSpec, #[case] input: Value) {
    match check(&input, &member_spec) {
        Ok(accepted) => assert!(accepted.into_value().is_object()),
        Err(errors) => assert!(!errors.as_slice().is_empty()),
    }
}

#[rstest]
fn accept_deserialises_the_coerced_value(member_spec: ConstraintSpec) {
    let member: Member = member_spec
        .accept(&json!({ "name": "Ada", "age": "36", "plan": "annual" }))
        .expect("input is accepted");

    assert_eq!(
        member,
        Member {
            name: "Ada".to_owned(),
            email: None,
            age: Some(36),
            plan: Some("annual".to_owned()),
            newsletter: None,
        }
    );
}

#[rstest]
fn accept_reports_typed_deserialisation_failures_by_path() {
    #[derive(Debug, Deserialize)]
    struct Narrow {
        #[expect(dead_code, reason = "only the deserialisation outcome matters")]
        count: u8,
    }

    let spec = ConstraintSpec::builder()
        .field(FieldSpec::required("count").kind(FieldKind::Integer))
        .build()
        .expect("spec is consistent");

    let errors = spec
        .accept::<Narrow>(&json!({ "count": 4096 }))
        .expect_err("value does not fit in u8");
    assert_eq!(errors.as_slice()[0].field, "count");
}

#[rstest]
fn pattern_rule_rejects_non_matching_strings() {
    let phone = regex::Regex::new(r"^\+?[0-9 ]{7,15}$").expect("pattern compiles");
    let spec = ConstraintSpec::builder()
        .field(FieldSpec::optional("phone").kind(FieldKind::String).pattern(phone))
        .build()
        .expect("spec is consistent");

    assert!(check(&json!({ "phone": "+44 7700 900123" }), &spec).is_ok());
    let errors = check(&json!({ "phone": "call me" }), &spec).expect_err("phone is malformed");
    assert_eq!(errors.as_slice()[0].message, "phone has an invalid format");
}
