//! The generic checker evaluating a [`ConstraintSpec`] against raw input.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ValidationError, ValidationErrors};
use crate::spec::{ConstraintSpec, FieldSpec};

/// Field name reported when the input as a whole is unusable.
pub const BODY_FIELD: &str = "body";

/// Input that satisfied every declared constraint.
///
/// Holds only declared fields, with declared coercions applied. Extra input
/// fields are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted(Map<String, Value>);

impl Accepted {
    /// Borrow an accepted field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Convert into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialise the accepted object into a typed value.
    ///
    /// # Errors
    /// Returns a single violation naming the first path that does not fit `T`.
    pub fn deserialize<T>(self) -> Result<T, ValidationErrors>
    where
        T: DeserializeOwned,
    {
        serde_path_to_error::deserialize(self.into_value()).map_err(|error| {
            let path = error.path().to_string();
            let field = if path == "." { BODY_FIELD.to_owned() } else { path };
            let message = error.into_inner().to_string();
            ValidationErrors::single(ValidationError::new(field, message))
        })
    }
}

/// Evaluate `spec` against `input`.
///
/// Every declared field is checked independently so all violations are
/// reported together. Absent optional fields are skipped entirely.
///
/// # Errors
/// Returns the non-empty list of violations when any field fails.
pub fn check(input: &Value, spec: &ConstraintSpec) -> Result<Accepted, ValidationErrors> {
    let Some(object) = input.as_object() else {
        debug!("constraint check rejected non-object input");
        return Err(ValidationErrors::single(ValidationError::new(
            BODY_FIELD,
            "request body must be a JSON object",
        )));
    };

    let mut accepted = Map::new();
    let mut errors = Vec::new();
    for field in spec.fields() {
        match check_field(field, object.get(field.name())) {
            Ok(Some(value)) => {
                accepted.insert(field.name().to_owned(), value);
            }
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    match ValidationErrors::from_vec(errors) {
        Some(errors) => {
            debug!(
                violations = errors.as_slice().len(),
                "constraint check rejected input"
            );
            Err(errors)
        }
        None => Ok(Accepted(accepted)),
    }
}

fn check_field(field: &FieldSpec, raw: Option<&Value>) -> Result<Option<Value>, ValidationError> {
    let name = field.name();
    let Some(raw) = raw.filter(|value| !value.is_null()) else {
        if field.is_required() {
            return Err(ValidationError::new(name, format!("{name} is required")));
        }
        return Ok(None);
    };

    let value = match field.coercion() {
        Some(coercion) => coercion.apply(raw),
        None => raw.clone(),
    };

    if let Some(kind) = field.expected_kind()
        && !kind.matches(&value)
    {
        return Err(
            ValidationError::new(name, format!("{name} must be {kind}")).with_value(raw.clone()),
        );
    }

    field
        .evaluate_rules(&value)
        .map_err(|message| ValidationError::new(name, message).with_value(raw.clone()))?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests;
