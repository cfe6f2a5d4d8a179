//! Subscription lifecycle actions.
//!
//! ```text
//! POST /api/v1/clients/{id}/subscription/freeze
//! {"startDate":"2026-06-01","endDate":"2026-06-15","reason":"Travel"}
//! ```
//!
//! The payload shape depends on the action named in the path, so the body is
//! read raw and checked against the matching terms once the path is known.

use std::sync::OnceLock;

use actix_web::{HttpResponse, post, web};
use constraints::{ConstraintSpec, FieldKind, FieldSpec, Format};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    AffiliateTerms, CancelTerms, ClientId, FreezeTerms, PaymentMethod, Permission,
    SubscriptionAction, SubscriptionCommand, SubscriptionReceipt, UpgradeTerms,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Permissions;
use crate::inbound::http::clients::resolve_client;
use crate::inbound::http::error::unclassified;
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FrozenSpec, RawJson, RequestShape, ShapeError, ShapeSpec, ValidatedPath, accept_shape,
    frozen_spec,
};

const REASON_MAX: usize = 255;

fn reason_field() -> FieldSpec {
    FieldSpec::optional("reason")
        .kind(FieldKind::String)
        .max_length(REASON_MAX)
}

fn date_field(name: &str) -> FieldSpec {
    FieldSpec::required(name)
        .kind(FieldKind::String)
        .format(Format::Date)
}

fn plan_field() -> FieldSpec {
    FieldSpec::required("planId")
        .kind(FieldKind::String)
        .format(Format::Uuid)
}

impl RequestShape for AffiliateTerms {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(plan_field())
                .field(date_field("startDate"))
                .field(FieldSpec::required("paymentMethod").one_of(PaymentMethod::NAMES))
                .build()
        })
    }
}

impl RequestShape for UpgradeTerms {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || ConstraintSpec::builder().field(plan_field()).build())
    }
}

impl RequestShape for FreezeTerms {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(date_field("startDate"))
                .field(date_field("endDate"))
                .field(reason_field())
                .build()
        })
    }
}

impl RequestShape for CancelTerms {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || ConstraintSpec::builder().field(reason_field()).build())
    }
}

/// Path parameters naming the client and the requested action.
#[derive(Debug, Deserialize)]
pub struct SubscriptionPath {
    pub id: ClientId,
    pub action: SubscriptionAction,
}

impl RequestShape for SubscriptionPath {
    fn constraints() -> ShapeSpec {
        static SPEC: OnceLock<FrozenSpec> = OnceLock::new();
        frozen_spec(&SPEC, || {
            ConstraintSpec::builder()
                .field(FieldSpec::required("id").format(Format::Uuid))
                .field(
                    FieldSpec::required("action")
                        .one_of(SubscriptionAction::ALL.map(SubscriptionAction::as_str)),
                )
                .build()
        })
    }
}

/// Check `body` against the terms `action` expects.
///
/// # Errors
/// Every violation in `body` is reported together; a freeze whose end
/// precedes its start fails on `endDate`.
pub fn accept_command(
    action: SubscriptionAction,
    body: &Value,
) -> Result<SubscriptionCommand, ShapeError> {
    let command = match action {
        SubscriptionAction::Affiliate => SubscriptionCommand::Affiliate(accept_shape(body)?),
        SubscriptionAction::Upgrade => SubscriptionCommand::Upgrade(accept_shape(body)?),
        SubscriptionAction::Freeze => {
            let terms: FreezeTerms = accept_shape(body)?;
            terms.ensure_ordered()?;
            SubscriptionCommand::Freeze(terms)
        }
        SubscriptionAction::Cancel => SubscriptionCommand::Cancel(accept_shape(body)?),
    };
    Ok(command)
}

/// Submit a lifecycle action for a client's subscription.
#[utoipa::path(
    post,
    path = "/api/v1/clients/{id}/subscription/{action}",
    request_body(
        content = serde_json::Value,
        description = "Terms for the action: AffiliateTerms, UpgradeTerms, FreezeTerms or CancelTerms"
    ),
    params(
        ("id" = String, Path, description = "Client UUID"),
        ("action" = SubscriptionAction, Path, description = "Lifecycle action"),
        ("x-granted-permissions" = String, Header, description = "Must include subscriptions:write")
    ),
    responses(
        (status = 202, description = "Command handed to billing", body = SubscriptionReceipt),
        (status = 403, description = "Missing subscriptions:write", body = ErrorResponseSchema),
        (status = 404, description = "No such client", body = ErrorResponseSchema),
        (status = 422, description = "Invalid action or terms", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["subscriptions"],
    operation_id = "submitSubscriptionAction"
)]
#[post("/clients/{id}/subscription/{action}")]
pub async fn submit_subscription_action(
    state: web::Data<HttpState>,
    permissions: Permissions,
    ValidatedPath(path): ValidatedPath<SubscriptionPath>,
    RawJson(body): RawJson,
) -> ApiResult<HttpResponse> {
    let command = accept_command(path.action, &body)?;
    permissions.require(Permission::SubscriptionsWrite)?;
    resolve_client(&state, path.id).await?;
    state
        .subscriptions
        .submit(&path.id, &command)
        .await
        .map_err(unclassified)?;
    let receipt = SubscriptionReceipt::new(path.id, command, state.clock.utc());
    tracing::info!(client_id = %path.id, action = %receipt.action, "subscription action accepted");
    Ok(HttpResponse::Accepted().json(receipt))
}
