//! Subscription lifecycle commands.
//!
//! The billing transitions themselves belong to an external collaborator;
//! this module owns the accepted command shapes and the date arithmetic the
//! boundary reports back to callers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ClientId, Error};

/// Lifecycle action requested for a client's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Affiliate,
    Upgrade,
    Freeze,
    Cancel,
}

impl SubscriptionAction {
    pub const ALL: [Self; 4] = [Self::Affiliate, Self::Upgrade, Self::Freeze, Self::Cancel];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affiliate => "affiliate",
            Self::Upgrade => "upgrade",
            Self::Freeze => "freeze",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for SubscriptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a path segment names no known action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subscription action: {0}")]
pub struct UnknownAction(String);

impl FromStr for SubscriptionAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}

/// Accepted ways of paying for a new affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub const NAMES: [&'static str; 3] = ["cash", "card", "transfer"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateTerms {
    pub plan_id: Uuid,
    pub start_date: NaiveDate,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeTerms {
    pub plan_id: Uuid,
}

/// Pause window for an active subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FreezeTerms {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FreezeTerms {
    /// Reject windows that end before they start.
    pub fn ensure_ordered(&self) -> Result<(), Error> {
        if self.end_date < self.start_date {
            return Err(Error::invalid_field_with_value(
                "endDate",
                "endDate must not be before startDate",
                self.end_date.to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Validated action payload, one variant per [`SubscriptionAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SubscriptionCommand {
    Affiliate(AffiliateTerms),
    Upgrade(UpgradeTerms),
    Freeze(FreezeTerms),
    Cancel(CancelTerms),
}

impl SubscriptionCommand {
    pub fn action(&self) -> SubscriptionAction {
        match self {
            Self::Affiliate(_) => SubscriptionAction::Affiliate,
            Self::Upgrade(_) => SubscriptionAction::Upgrade,
            Self::Freeze(_) => SubscriptionAction::Freeze,
            Self::Cancel(_) => SubscriptionAction::Cancel,
        }
    }
}

/// Acknowledgement returned once a command is handed to billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionReceipt {
    pub client_id: ClientId,
    pub action: SubscriptionAction,
    pub details: SubscriptionCommand,
    pub accepted_at: DateTime<Utc>,
    /// Whole days left in a freeze window, present for freezes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl SubscriptionReceipt {
    pub fn new(client_id: ClientId, command: SubscriptionCommand, accepted_at: DateTime<Utc>) -> Self {
        let days_remaining = match &command {
            SubscriptionCommand::Freeze(terms) => Some(calculate_days_remaining(
                terms.end_date,
                accepted_at.date_naive(),
            )),
            _ => None,
        };
        Self {
            client_id,
            action: command.action(),
            details: command,
            accepted_at,
            days_remaining,
        }
    }
}

/// Whole days from `today` until `end`, never negative.
///
/// # Examples
/// ```
/// use backend::domain::calculate_days_remaining;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 10).expect("date");
/// let end = NaiveDate::from_ymd_opt(2026, 1, 31).expect("date");
/// assert_eq!(calculate_days_remaining(end, today), 21);
/// assert_eq!(calculate_days_remaining(today, end), 0);
/// ```
pub fn calculate_days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    end.signed_duration_since(today).num_days().max(0)
}
