//! Recording sales against registered clients.

use std::sync::OnceLock;

use actix_web::{HttpResponse, post, web};
use constraints::{ConstraintSpec, FieldKind, FieldSpec, Format};

use crate::domain::{Permission, Sale, SaleDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Permissions;
use crate::inbound::http::clients::resolve_client;
use crate::inbound::http::error::unclassified;
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FrozenSpec, RequestShape, ShapeSpec, ValidatedJson, frozen_spec,
};

/// Largest single sale accepted, in the gym's currency.
pub const MAX_SALE_AMOUNT: f64 = 100_000.0;

impl RequestShape for SaleDraft {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(
                    FieldSpec::required("clientId")
                        .kind(FieldKind::String)
                        .format(Format::Uuid),
                )
                .field(
                    FieldSpec::required("amount")
                        .kind(FieldKind::Number)
                        .min(0.01)
                        .max(MAX_SALE_AMOUNT),
                )
                .field(
                    FieldSpec::required("soldOn")
                        .kind(FieldKind::String)
                        .format(Format::Date),
                )
                .field(
                    FieldSpec::optional("concept")
                        .kind(FieldKind::String)
                        .max_length(120),
                )
                .build()
        })
    }
}

/// Record a sale for an existing client.
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    request_body = SaleDraft,
    params(("x-granted-permissions" = String, Header, description = "Must include sales:write")),
    responses(
        (status = 201, description = "Sale recorded", body = Sale),
        (status = 403, description = "Missing sales:write", body = ErrorResponseSchema),
        (status = 404, description = "No such client", body = ErrorResponseSchema),
        (status = 422, description = "Invalid sale payload", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["sales"],
    operation_id = "recordSale"
)]
#[post("/sales")]
pub async fn record_sale(
    state: web::Data<HttpState>,
    permissions: Permissions,
    ValidatedJson(draft): ValidatedJson<SaleDraft>,
) -> ApiResult<HttpResponse> {
    permissions.require(Permission::SalesWrite)?;
    resolve_client(&state, draft.client_id).await?;
    let sale = Sale::record(draft, state.clock.utc());
    state.sales.record(&sale).await.map_err(unclassified)?;
    tracing::info!(sale_id = %sale.id, client_id = %sale.client_id, "sale recorded");
    Ok(HttpResponse::Created().json(sale))
}
