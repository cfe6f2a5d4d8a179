//! Server construction and middleware wiring.

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::FixtureSubscriptionGateway;
use backend::inbound::http::api_scope;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::validation::json_config;
use backend::outbound::memory::{InMemoryClientDirectory, InMemorySalesLedger};
use backend::settings::ServerSettings;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// State backed by the in-process adapters.
///
/// Billing is an external collaborator; until one is wired in, subscription
/// commands are acknowledged by the fixture gateway.
fn build_http_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(InMemoryClientDirectory::new()),
        Arc::new(InMemorySalesLedger::new()),
        Arc::new(FixtureSubscriptionGateway),
        Arc::new(DefaultClock),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config(json_limit))
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from loaded settings.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state();
    let json_limit = settings.json_limit();
    let bind_addr = settings.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), json_limit)
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, json_limit, "server listening");
    health_state.mark_ready();
    Ok(server)
}
