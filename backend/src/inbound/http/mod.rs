//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod sales;
pub mod schemas;
pub mod state;
pub mod subscriptions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};
use constraints::SpecError;

use crate::domain::{
    AffiliateTerms, CancelTerms, ClientDraft, FreezeTerms, SaleDraft, SummaryQuery, UpgradeTerms,
};
use validation::ensure_shape;

/// Versioned scope holding every resource endpoint.
///
/// Health probes sit outside it at the root.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(clients::create_client)
        .service(clients::get_client)
        .service(sales::record_sale)
        .service(subscriptions::submit_subscription_action)
        .service(dashboard::dashboard_summary)
}

/// Build the constraint spec of every accepted request shape.
///
/// Run before serving so an inconsistent declaration stops start-up instead
/// of failing requests.
///
/// # Errors
/// Returns the first [`SpecError`] found.
pub fn check_request_shapes() -> Result<(), SpecError> {
    ensure_shape::<ClientDraft>()?;
    ensure_shape::<clients::ClientPath>()?;
    ensure_shape::<SaleDraft>()?;
    ensure_shape::<AffiliateTerms>()?;
    ensure_shape::<UpgradeTerms>()?;
    ensure_shape::<FreezeTerms>()?;
    ensure_shape::<CancelTerms>()?;
    ensure_shape::<subscriptions::SubscriptionPath>()?;
    ensure_shape::<SummaryQuery>()
}
