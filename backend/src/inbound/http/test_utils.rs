//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::{MessageBody, to_bytes};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use super::state::HttpState;
use crate::domain::ports::{FixtureSubscriptionGateway, SubscriptionGateway};
use crate::outbound::memory::{InMemoryClientDirectory, InMemorySalesLedger};

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(pub DateTime<Utc>);

impl FixtureClock {
    /// 2026-03-01T09:30:00.250Z
    pub fn standard() -> Self {
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("valid fixture instant")
            + chrono::Duration::milliseconds(250);
        Self(instant)
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// State backed by empty in-memory adapters and a pinned clock.
pub fn memory_state() -> HttpState {
    memory_state_with_gateway(Arc::new(FixtureSubscriptionGateway))
}

pub fn memory_state_with_gateway(gateway: Arc<dyn SubscriptionGateway>) -> HttpState {
    HttpState::new(
        Arc::new(InMemoryClientDirectory::new()),
        Arc::new(InMemorySalesLedger::new()),
        gateway,
        Arc::new(FixtureClock::standard()),
    )
}

/// Read a response body as JSON.
pub async fn json_body<B>(body: B) -> Value
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let bytes = to_bytes(body).await.expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
