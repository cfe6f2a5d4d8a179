//! Recorded sales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ClientId;

/// Accepted input for recording a sale.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub client_id: ClientId,
    pub amount: f64,
    pub sold_on: NaiveDate,
    #[serde(default)]
    pub concept: Option<String>,
}

/// A sale attributed to a client on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub client_id: ClientId,
    #[schema(example = 49.9)]
    pub amount: f64,
    pub sold_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Sale {
    pub fn record(draft: SaleDraft, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: draft.client_id,
            amount: draft.amount,
            sold_on: draft.sold_on,
            concept: draft
                .concept
                .map(|concept| concept.trim().to_owned())
                .filter(|concept| !concept.is_empty()),
            recorded_at,
        }
    }
}
