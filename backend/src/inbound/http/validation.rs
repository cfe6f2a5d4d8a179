//! Extractors that run the constraint checker before a handler executes.
//!
//! Each accepted input shape declares its [`ConstraintSpec`] once through
//! [`RequestShape`]. The extractors parse the raw input, check it against
//! that spec and deserialise only the accepted value, so a handler never sees
//! input that failed its constraints. Rejections surface as
//! `VALIDATION_ERROR` envelopes.

use std::sync::OnceLock;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use constraints::{ConstraintSpec, SpecError};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::error::unclassified;

/// Field name reported when the query string itself cannot be parsed.
pub const QUERY_FIELD: &str = "query";

/// Outcome of building a shape's spec, kept for the life of the process.
pub type FrozenSpec = Result<ConstraintSpec, SpecError>;

/// A shape's frozen spec, or the declaration error that prevented it.
pub type ShapeSpec = Result<&'static ConstraintSpec, &'static SpecError>;

/// An input shape with declared field constraints.
pub trait RequestShape: DeserializeOwned + 'static {
    fn constraints() -> ShapeSpec;
}

/// Build a spec once and keep the outcome for the life of the process.
pub fn frozen_spec(
    cell: &'static OnceLock<FrozenSpec>,
    build: impl FnOnce() -> FrozenSpec,
) -> ShapeSpec {
    cell.get_or_init(build).as_ref()
}

/// Why an input shape could not be accepted.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The input violated the shape's constraints.
    #[error(transparent)]
    Rejected(#[from] Error),
    /// The shape's own declarations are inconsistent.
    #[error("constraint spec for {shape} is inconsistent: {error}")]
    Misdeclared {
        shape: &'static str,
        error: &'static SpecError,
    },
}

impl From<ShapeError> for actix_web::Error {
    fn from(value: ShapeError) -> Self {
        match value {
            ShapeError::Rejected(error) => error.into(),
            misdeclared @ ShapeError::Misdeclared { .. } => unclassified(misdeclared),
        }
    }
}

/// Confirm that `T`'s declarations build.
///
/// # Errors
/// Returns the [`SpecError`] raised while freezing `T`'s spec.
pub fn ensure_shape<T: RequestShape>() -> Result<(), SpecError> {
    T::constraints().map(|_| ()).map_err(SpecError::clone)
}

/// JSON body limits applied to [`ValidatedJson`] and [`RawJson`].
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit)
}

/// Check `input` against `T`'s constraints and deserialise the accepted value.
///
/// # Errors
/// [`ShapeError::Rejected`] carries every violation found in `input`;
/// [`ShapeError::Misdeclared`] means `T`'s spec never built.
pub fn accept_shape<T: RequestShape>(input: &Value) -> Result<T, ShapeError> {
    let spec = T::constraints().map_err(|error| ShapeError::Misdeclared {
        shape: std::any::type_name::<T>(),
        error,
    })?;
    spec.accept::<T>(input).map_err(|errors| {
        debug!(violations = errors.as_slice().len(), "request input rejected");
        ShapeError::Rejected(Error::validation(errors))
    })
}

fn accept<T: RequestShape>(input: &Value) -> Result<T, actix_web::Error> {
    accept_shape::<T>(input).map_err(Into::into)
}

fn parse_body(
    req: &HttpRequest,
    payload: &mut Payload,
) -> LocalBoxFuture<'static, Result<Value, actix_web::Error>> {
    let fut = web::Json::<Value>::from_request(req, payload);
    Box::pin(async move {
        fut.await.map(web::Json::into_inner).map_err(|err| -> actix_web::Error {
            debug!(error = %err, "request body could not be parsed");
            Error::invalid_field(
                constraints::BODY_FIELD,
                format!("request body is not valid JSON: {err}"),
            )
            .into()
        })
    })
}

fn strings_to_object<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Value {
    let object: Map<String, Value> = pairs
        .into_iter()
        .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
        .collect();
    Value::Object(object)
}

/// JSON body checked against `T`'s constraints.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestShape> FromRequest for ValidatedJson<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = parse_body(req, payload);
        Box::pin(async move {
            let value = body.await?;
            accept::<T>(&value).map(ValidatedJson)
        })
    }
}

/// JSON body parsed but not yet checked.
///
/// For payloads whose shape depends on another part of the request, such as
/// a path segment.
#[derive(Debug)]
pub struct RawJson(pub Value);

impl FromRequest for RawJson {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = parse_body(req, payload);
        Box::pin(async move { body.await.map(RawJson) })
    }
}

/// Query string checked against `T`'s constraints.
///
/// Every query value arrives as a string; declare a coercion on fields that
/// should be numbers or booleans.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> ValidatedQuery<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestShape> FromRequest for ValidatedQuery<T> {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
            .map_err(|err| -> actix_web::Error {
                Error::invalid_field(QUERY_FIELD, format!("query string is malformed: {err}"))
                    .into()
            })
            .and_then(|query| {
                let value = strings_to_object(
                    query
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                );
                accept::<T>(&value)
            })
            .map(ValidatedQuery);
        std::future::ready(result)
    }
}

/// Path parameters checked against `T`'s constraints.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T> ValidatedPath<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RequestShape> FromRequest for ValidatedPath<T> {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = strings_to_object(req.match_info().iter());
        std::future::ready(accept::<T>(&value).map(ValidatedPath))
    }
}
