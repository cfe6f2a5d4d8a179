//! Classified request failures.
//!
//! These errors are transport agnostic. The HTTP adapter formats them into
//! the canonical error envelope; the set of kinds is closed and anything
//! outside it is left to the hosting framework's generic failure handling.

use std::borrow::Cow;
use std::fmt;

use constraints::{ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
///
/// The HTTP status of every envelope is a pure function of this code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The caller lacks a permission the operation needs.
    AuthorizationError,
    /// The addressed resource does not exist.
    ResourceNotFound,
    /// The request input failed its declared constraints.
    ValidationError,
}

impl ErrorCode {
    /// Every code, in a stable order.
    pub const ALL: [Self; 3] = [
        Self::AuthorizationError,
        Self::ResourceNotFound,
        Self::ValidationError,
    ];

    /// HTTP status code reported for this failure category.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ResourceNotFound.status_code(), 404);
    /// ```
    pub const fn status_code(self) -> u16 {
        match self {
            Self::AuthorizationError => 403,
            Self::ResourceNotFound => 404,
            Self::ValidationError => 422,
        }
    }

    /// Wire representation of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationError => "AUTHORIZATION_ERROR",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific context carried by an [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The authorization layer refused the operation.
    AuthorizationDenied {
        /// Permission the caller would have needed, when known.
        required_permission: Option<String>,
    },
    /// A lookup by identifier found nothing.
    ResourceNotFound {
        /// Human name of the resource type, e.g. `Client`.
        resource: String,
        /// Identifier that was looked up, when there was one.
        identifier: Option<String>,
    },
    /// Input failed validation before the handler ran.
    ValidationFailed {
        /// Every violation found in the input.
        errors: Vec<ValidationError>,
    },
}

/// A classified failure raised while serving a request.
///
/// The message is optional; when none is supplied a default is derived from
/// the kind-specific context.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found_with_id("Client", 42);
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
/// assert_eq!(err.message(), "Client with identifier '42' not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
}

impl Error {
    fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Authorization denial without a named permission.
    pub fn forbidden() -> Self {
        Self::from_kind(ErrorKind::AuthorizationDenied {
            required_permission: None,
        })
    }

    /// Authorization denial naming the permission that was missing.
    pub fn missing_permission(permission: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::AuthorizationDenied {
            required_permission: Some(permission.into()),
        })
    }

    /// Absence of a resource when no identifier applies.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::ResourceNotFound {
            resource: resource.into(),
            identifier: None,
        })
    }

    /// Absence of the resource addressed by `identifier`.
    pub fn not_found_with_id(resource: impl Into<String>, identifier: impl fmt::Display) -> Self {
        Self::from_kind(ErrorKind::ResourceNotFound {
            resource: resource.into(),
            identifier: Some(identifier.to_string()),
        })
    }

    /// Validation failure carrying every violation found.
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::from_kind(ErrorKind::ValidationFailed {
            errors: errors.into_vec(),
        })
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(ValidationErrors::single(ValidationError::new(field, message)))
    }

    /// Validation failure for a single field, echoing the offending value.
    pub fn invalid_field_with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self::validation(ValidationErrors::single(
            ValidationError::new(field, message).with_value(value.into()),
        ))
    }

    /// Replace the default message.
    ///
    /// Blank messages are ignored so the envelope never carries an empty
    /// `message`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.trim().is_empty() {
            self.message = Some(message);
        }
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ErrorKind::AuthorizationDenied { .. } => ErrorCode::AuthorizationError,
            ErrorKind::ResourceNotFound { .. } => ErrorCode::ResourceNotFound,
            ErrorKind::ValidationFailed { .. } => ErrorCode::ValidationError,
        }
    }

    /// Kind-specific context.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Human-readable message, falling back to the kind's default text.
    pub fn message(&self) -> Cow<'_, str> {
        if let Some(message) = &self.message {
            return Cow::Borrowed(message.as_str());
        }
        match &self.kind {
            ErrorKind::AuthorizationDenied {
                required_permission: Some(permission),
            } => Cow::Owned(format!("Missing required permission: {permission}")),
            ErrorKind::AuthorizationDenied {
                required_permission: None,
            } => Cow::Borrowed("You do not have permission to perform this action"),
            ErrorKind::ResourceNotFound {
                resource,
                identifier: Some(identifier),
            } => Cow::Owned(format!(
                "{resource} with identifier '{identifier}' not found"
            )),
            ErrorKind::ResourceNotFound {
                resource,
                identifier: None,
            } => Cow::Owned(format!("{resource} not found")),
            ErrorKind::ValidationFailed { .. } => Cow::Borrowed("Validation failed"),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {}
