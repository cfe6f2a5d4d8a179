//! Gym management REST boundary.
//!
//! Requests are checked against declared field constraints before any
//! handler runs, and every classified failure leaves the service as one
//! canonical JSON error envelope.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
