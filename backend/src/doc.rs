//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound HTTP adapter, the
//! domain schemas they exchange and the error envelope wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AffiliateTerms, CancelTerms, Client, ClientDraft, ClientRevenue, DashboardSummary,
    FreezeTerms, PaymentMethod, Sale, SaleDraft, SubscriptionAction, SubscriptionCommand,
    SubscriptionReceipt, UpgradeTerms,
};
use crate::inbound::http::auth::GRANTED_PERMISSIONS_HEADER;
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorResponseSchema, ValidationErrorSchema};

/// Describe the trusted permission header as the security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GrantedPermissions",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                GRANTED_PERMISSIONS_HEADER,
                "Comma separated permissions forwarded by the upstream authorization layer.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gym management API",
        description = "Validated request boundary for clients, sales, subscriptions and dashboard metrics.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("GrantedPermissions" = [])),
    paths(
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::get_client,
        crate::inbound::http::sales::record_sale,
        crate::inbound::http::subscriptions::submit_subscription_action,
        crate::inbound::http::dashboard::dashboard_summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorResponseSchema,
        ErrorCodeSchema,
        ValidationErrorSchema,
        Client,
        ClientDraft,
        Sale,
        SaleDraft,
        SubscriptionAction,
        SubscriptionCommand,
        SubscriptionReceipt,
        AffiliateTerms,
        UpgradeTerms,
        FreezeTerms,
        CancelTerms,
        PaymentMethod,
        DashboardSummary,
        ClientRevenue,
        ProbeStatus,
    )),
    tags(
        (name = "clients", description = "Client registration and lookup"),
        (name = "sales", description = "Recorded sales"),
        (name = "subscriptions", description = "Subscription lifecycle actions"),
        (name = "dashboard", description = "Derived sales metrics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
