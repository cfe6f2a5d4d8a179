//! Backend entry-point: loads settings, installs logging and runs the server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::check_request_shapes;
use backend::inbound::http::health::HealthState;
use backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = color_eyre::install() {
        eprintln!("failed to install error reporting: {error}");
    }

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    check_request_shapes()
        .map_err(|e| std::io::Error::other(format!("invalid request shape: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, &settings)?;
    server.await
}
