//! Dashboard summary over recorded sales.
//!
//! ```text
//! GET /api/v1/dashboard/summary?from=2026-02-01&to=2026-02-28&top=3
//! ```

use std::sync::OnceLock;

use actix_web::{get, web};
use constraints::{Coercion, ConstraintSpec, FieldKind, FieldSpec, Format};

use crate::domain::{DEFAULT_TOP_CLIENTS, DashboardSummary, DateRange, Permission, SummaryQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Permissions;
use crate::inbound::http::error::unclassified;
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FrozenSpec, RequestShape, ShapeSpec, ValidatedQuery, frozen_spec,
};

/// Upper bound on the number of top clients a caller may request.
pub const MAX_TOP_CLIENTS: usize = 50;

impl RequestShape for SummaryQuery {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(FieldSpec::required("from").format(Format::Date))
                .field(FieldSpec::required("to").format(Format::Date))
                .field(
                    FieldSpec::optional("top")
                        .coerce(Coercion::Number)
                        .kind(FieldKind::Integer)
                        .min(1.0)
                        .max(MAX_TOP_CLIENTS as f64),
                )
                .build()
        })
    }
}

/// Revenue and sales metrics for an inclusive date range.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    params(
        ("from" = String, Query, description = "First day, YYYY-MM-DD"),
        ("to" = String, Query, description = "Last day, YYYY-MM-DD"),
        ("top" = Option<u32>, Query, description = "Top clients to list, 1 to 50, default 5"),
        ("x-granted-permissions" = String, Header, description = "Must include dashboard:read")
    ),
    responses(
        (status = 200, description = "Summary", body = DashboardSummary),
        (status = 403, description = "Missing dashboard:read", body = ErrorResponseSchema),
        (status = 422, description = "Invalid query", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["dashboard"],
    operation_id = "getDashboardSummary"
)]
#[get("/dashboard/summary")]
pub async fn dashboard_summary(
    state: web::Data<HttpState>,
    permissions: Permissions,
    ValidatedQuery(query): ValidatedQuery<SummaryQuery>,
) -> ApiResult<web::Json<DashboardSummary>> {
    let range = DateRange::new(query.from, query.to)?;
    permissions.require(Permission::DashboardRead)?;
    let sales = state.sales.sales_between(&range).await.map_err(unclassified)?;
    let top = query.top.unwrap_or(DEFAULT_TOP_CLIENTS);
    Ok(web::Json(DashboardSummary::compute(range, &sales, top)))
}
