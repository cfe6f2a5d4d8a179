//! Client registration and lookup.
//!
//! ```text
//! POST /api/v1/clients {"fullName":"Ada Lovelace","email":"ada@example.com"}
//! GET /api/v1/clients/{id}
//! ```

use std::sync::OnceLock;

use actix_web::{HttpResponse, get, post, web};
use constraints::{ConstraintSpec, FieldKind, FieldSpec, Format};
use regex::Regex;
use serde::Deserialize;

use crate::domain::ports::ClientRepositoryError;
use crate::domain::{CLIENT_RESOURCE, Client, ClientDraft, ClientId, Error, Permission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Permissions;
use crate::inbound::http::error::unclassified;
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FrozenSpec, RequestShape, ShapeSpec, ValidatedJson, ValidatedPath, frozen_spec,
};

pub const FULL_NAME_MAX: usize = 120;
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 ()-]{5,18}[0-9]$";

impl RequestShape for ClientDraft {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            let phone = Regex::new(PHONE_PATTERN)?;
            ConstraintSpec::builder()
                .field(
                    FieldSpec::required("fullName")
                        .kind(FieldKind::String)
                        .min_length(2)
                        .max_length(FULL_NAME_MAX),
                )
                .field(
                    FieldSpec::required("email")
                        .kind(FieldKind::String)
                        .max_length(254)
                        .format(Format::Email),
                )
                .field(
                    FieldSpec::optional("phone")
                        .kind(FieldKind::String)
                        .pattern(phone),
                )
                .field(
                    FieldSpec::optional("birthDate")
                        .kind(FieldKind::String)
                        .format(Format::Date),
                )
                .build()
        })
    }
}

/// Path parameters for client-addressed routes.
#[derive(Debug, Deserialize)]
pub struct ClientPath {
    pub id: ClientId,
}

impl RequestShape for ClientPath {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(FieldSpec::required("id").format(Format::Uuid))
                .build()
        })
    }
}

fn store_failure(error: ClientRepositoryError) -> actix_web::Error {
    match error {
        ClientRepositoryError::DuplicateEmail { email } => {
            Error::invalid_field_with_value("email", "email is already registered", email).into()
        }
        other => unclassified(other),
    }
}

/// Resolve a client or fail with a not-found error naming `id`.
pub(crate) async fn resolve_client(state: &HttpState, id: ClientId) -> ApiResult<Client> {
    state
        .clients
        .find_by_id(&id)
        .await
        .map_err(unclassified)?
        .ok_or_else(|| Error::not_found_with_id(CLIENT_RESOURCE, id).into())
}

/// Register a client.
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = ClientDraft,
    params(("x-granted-permissions" = String, Header, description = "Must include clients:write")),
    responses(
        (status = 201, description = "Client registered", body = Client),
        (status = 403, description = "Missing clients:write", body = ErrorResponseSchema),
        (status = 422, description = "Invalid client payload", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["clients"],
    operation_id = "createClient"
)]
#[post("/clients")]
pub async fn create_client(
    state: web::Data<HttpState>,
    permissions: Permissions,
    ValidatedJson(draft): ValidatedJson<ClientDraft>,
) -> ApiResult<HttpResponse> {
    permissions.require(Permission::ClientsWrite)?;
    let client = Client::register(ClientId::random(), draft, state.clock.utc());
    state.clients.save(&client).await.map_err(store_failure)?;
    tracing::info!(client_id = %client.id(), "client registered");
    Ok(HttpResponse::Created().json(client))
}

/// Fetch a client by id.
#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(
        ("id" = String, Path, description = "Client UUID"),
        ("x-granted-permissions" = String, Header, description = "Must include clients:read")
    ),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 403, description = "Missing clients:read", body = ErrorResponseSchema),
        (status = 404, description = "No such client", body = ErrorResponseSchema),
        (status = 422, description = "Malformed id", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["clients"],
    operation_id = "getClient"
)]
#[get("/clients/{id}")]
pub async fn get_client(
    state: web::Data<HttpState>,
    permissions: Permissions,
    ValidatedPath(path): ValidatedPath<ClientPath>,
) -> ApiResult<web::Json<Client>> {
    permissions.require(Permission::ClientsRead)?;
    let client = resolve_client(&state, path.id).await?;
    Ok(web::Json(client))
}
