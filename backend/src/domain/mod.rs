//! Domain primitives for the gym management boundary.
//!
//! Public surface:
//! - `Error`, `ErrorCode`, `ErrorKind`: the closed set of classified failures.
//! - `Client`, `Sale`, `SubscriptionCommand`: accepted request shapes.
//! - `DashboardSummary`: derived sales metrics.
//! - `PermissionSet`: permissions granted by the upstream authorization layer.
//! - `TraceId`: per-request correlation identifier.

pub mod clients;
pub mod dashboard;
pub mod error;
pub mod permissions;
pub mod ports;
pub mod sales;
pub mod subscriptions;
pub mod trace_id;

pub use self::clients::{CLIENT_RESOURCE, Client, ClientDraft, ClientId};
pub use self::dashboard::{
    ClientRevenue, DEFAULT_TOP_CLIENTS, DashboardSummary, DateRange, SummaryQuery,
    average_per_day, average_revenue,
};
pub use self::error::{Error, ErrorCode, ErrorKind};
pub use self::permissions::{Permission, PermissionSet, UnknownPermission};
pub use self::sales::{Sale, SaleDraft};
pub use self::subscriptions::{
    AffiliateTerms, CancelTerms, FreezeTerms, PaymentMethod, SubscriptionAction,
    SubscriptionCommand, SubscriptionReceipt, UnknownAction, UpgradeTerms,
    calculate_days_remaining,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
