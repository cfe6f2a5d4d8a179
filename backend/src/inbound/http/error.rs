//! Canonical error envelope and its actix mapping.
//!
//! Every classified failure leaves the service as one JSON object:
//!
//! ```json
//! {
//!   "statusCode": 404,
//!   "error": "RESOURCE_NOT_FOUND",
//!   "message": "Client with identifier '42' not found",
//!   "timestamp": "2026-03-01T09:30:00.000Z",
//!   "resource": "Client",
//!   "identifier": "42"
//! }
//! ```
//!
//! `statusCode` is always the status of `error`; parsing an envelope where the
//! two disagree fails. Kind-specific fields sit at the top level and only the
//! fields of the envelope's own kind may appear.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use constraints::ValidationError;
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, ErrorKind, TRACE_ID_HEADER, TraceId};

/// Result alias for handlers.
///
/// Classified failures convert through [`ResponseError`]; anything else is
/// left to actix's generic 500 handling.
pub type ApiResult<T> = Result<T, actix_web::Error>;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AuthorizationError => StatusCode::FORBIDDEN,
        ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Kind-specific envelope fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetails {
    Authorization {
        required_permission: Option<String>,
    },
    NotFound {
        resource: String,
        identifier: Option<String>,
    },
    Validation {
        errors: Vec<ValidationError>,
    },
}

impl ErrorDetails {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Authorization { .. } => ErrorCode::AuthorizationError,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::Validation { .. } => ErrorCode::ValidationError,
        }
    }
}

impl From<&ErrorKind> for ErrorDetails {
    fn from(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::AuthorizationDenied {
                required_permission,
            } => Self::Authorization {
                required_permission: required_permission.clone(),
            },
            ErrorKind::ResourceNotFound {
                resource,
                identifier,
            } => Self::NotFound {
                resource: resource.clone(),
                identifier: identifier.clone(),
            },
            ErrorKind::ValidationFailed { errors } => Self::Validation {
                errors: errors.clone(),
            },
        }
    }
}

/// Reasons a JSON document is not a valid error envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("statusCode {status} does not match error code {code}")]
    StatusMismatch { status: u16, code: ErrorCode },
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("timestamp is not RFC 3339: {0}")]
    InvalidTimestamp(String),
    #[error("{code} envelope is missing {field}")]
    MissingField {
        field: &'static str,
        code: ErrorCode,
    },
    #[error("{code} envelope must not carry {field}")]
    ForeignField {
        field: &'static str,
        code: ErrorCode,
    },
}

/// Formatted error envelope.
///
/// ## Invariants
/// - `status_code` equals `code.status_code()`.
/// - `details` belongs to `code`.
/// - `message` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorResponseDto", into = "ErrorResponseDto")]
pub struct ErrorResponse {
    status_code: u16,
    code: ErrorCode,
    message: String,
    timestamp: DateTime<Utc>,
    details: ErrorDetails,
}

impl ErrorResponse {
    /// Format `error` into an envelope stamped with the clock's current time.
    ///
    /// The timestamp is truncated to the millisecond precision of the wire
    /// format. Never fails: every [`Error`] carries the context its kind needs.
    pub fn format(error: &Error, clock: &dyn Clock) -> Self {
        let code = error.code();
        Self {
            status_code: code.status_code(),
            code,
            message: error.message().into_owned(),
            timestamp: clock.utc().trunc_subsecs(3),
            details: ErrorDetails::from(error.kind()),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ErrorResponseDto {
    status_code: u16,
    error: ErrorCode,
    message: String,
    timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required_permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<ValidationError>>,
}

impl From<ErrorResponse> for ErrorResponseDto {
    fn from(value: ErrorResponse) -> Self {
        let mut dto = Self {
            status_code: value.status_code,
            error: value.code,
            message: value.message,
            timestamp: value
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            required_permission: None,
            resource: None,
            identifier: None,
            errors: None,
        };
        match value.details {
            ErrorDetails::Authorization {
                required_permission,
            } => dto.required_permission = required_permission,
            ErrorDetails::NotFound {
                resource,
                identifier,
            } => {
                dto.resource = Some(resource);
                dto.identifier = identifier;
            }
            ErrorDetails::Validation { errors } => dto.errors = Some(errors),
        }
        dto
    }
}

fn reject_foreign<T>(
    value: Option<&T>,
    field: &'static str,
    code: ErrorCode,
) -> Result<(), EnvelopeError> {
    match value {
        Some(_) => Err(EnvelopeError::ForeignField { field, code }),
        None => Ok(()),
    }
}

impl TryFrom<ErrorResponseDto> for ErrorResponse {
    type Error = EnvelopeError;

    fn try_from(dto: ErrorResponseDto) -> Result<Self, Self::Error> {
        let code = dto.error;
        if dto.status_code != code.status_code() {
            return Err(EnvelopeError::StatusMismatch {
                status: dto.status_code,
                code,
            });
        }
        if dto.message.trim().is_empty() {
            return Err(EnvelopeError::EmptyMessage);
        }
        let timestamp = DateTime::parse_from_rfc3339(&dto.timestamp)
            .map_err(|err| EnvelopeError::InvalidTimestamp(err.to_string()))?
            .with_timezone(&Utc);

        let details = match code {
            ErrorCode::AuthorizationError => {
                reject_foreign(dto.resource.as_ref(), "resource", code)?;
                reject_foreign(dto.identifier.as_ref(), "identifier", code)?;
                reject_foreign(dto.errors.as_ref(), "errors", code)?;
                ErrorDetails::Authorization {
                    required_permission: dto.required_permission,
                }
            }
            ErrorCode::ResourceNotFound => {
                reject_foreign(dto.required_permission.as_ref(), "requiredPermission", code)?;
                reject_foreign(dto.errors.as_ref(), "errors", code)?;
                let resource = dto.resource.ok_or(EnvelopeError::MissingField {
                    field: "resource",
                    code,
                })?;
                ErrorDetails::NotFound {
                    resource,
                    identifier: dto.identifier,
                }
            }
            ErrorCode::ValidationError => {
                reject_foreign(dto.required_permission.as_ref(), "requiredPermission", code)?;
                reject_foreign(dto.resource.as_ref(), "resource", code)?;
                reject_foreign(dto.identifier.as_ref(), "identifier", code)?;
                let errors = dto
                    .errors
                    .filter(|errors| !errors.is_empty())
                    .ok_or(EnvelopeError::MissingField {
                        field: "errors",
                        code,
                    })?;
                ErrorDetails::Validation { errors }
            }
        };
        debug_assert_eq!(details.code(), code);

        Ok(Self {
            status_code: dto.status_code,
            code,
            message: dto.message,
            timestamp,
            details,
        })
    }
}

fn log_failure(error: &Error) {
    let trace_id = TraceId::current().map(|id| id.to_string());
    warn!(
        trace_id = trace_id.as_deref(),
        code = %error.code(),
        message = %error.message(),
        "request failed"
    );
}

/// Log a port failure outside the classified kinds and answer with a bare 500.
pub(crate) fn unclassified(failure: impl std::fmt::Display) -> actix_web::Error {
    let trace_id = TraceId::current().map(|id| id.to_string());
    error!(trace_id = trace_id.as_deref(), error = %failure, "unclassified failure");
    actix_web::error::ErrorInternalServerError("Internal server error")
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        let envelope = ErrorResponse::format(self, &DefaultClock);

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(envelope)
    }
}

#[cfg(test)]
mod tests;
