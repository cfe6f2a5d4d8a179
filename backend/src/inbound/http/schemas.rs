//! OpenAPI schema definitions for the error envelope.
//!
//! The envelope is serialised through a private wire type and the constraint
//! types live in a crate with no OpenAPI dependency, so their schemas are
//! registered here through utoipa's external schema support.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The caller lacks a required permission. Always 403.
    #[schema(rename = "AUTHORIZATION_ERROR")]
    AuthorizationError,
    /// The addressed resource does not exist. Always 404.
    #[schema(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// The input failed its declared constraints. Always 422.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
}

/// OpenAPI schema for [`constraints::ValidationError`].
#[derive(ToSchema)]
#[schema(as = ValidationError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationErrorSchema {
    /// Name of the offending field, or `body` for the input as a whole.
    #[schema(example = "email")]
    field: String,
    #[schema(example = "email must be a valid email address")]
    message: String,
    /// The rejected value, echoed when one was supplied.
    value: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::inbound::http::error::ErrorResponse`].
///
/// Kind-specific fields appear only for their code: `requiredPermission` for
/// authorization failures, `resource` and `identifier` for missing resources
/// and `errors` for validation failures.
#[derive(ToSchema)]
#[schema(as = ErrorResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorResponseSchema {
    /// HTTP status, fixed by `error`.
    #[schema(example = 404)]
    status_code: u16,
    error: ErrorCodeSchema,
    #[schema(example = "Client with identifier '42' not found")]
    message: String,
    /// RFC 3339 instant with millisecond precision.
    #[schema(format = DateTime, example = "2026-03-01T09:30:00.250Z")]
    timestamp: String,
    #[schema(example = "clients:write")]
    required_permission: Option<String>,
    #[schema(example = "Client")]
    resource: Option<String>,
    #[schema(example = "42")]
    identifier: Option<String>,
    errors: Option<Vec<ValidationErrorSchema>>,
}
