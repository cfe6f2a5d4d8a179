//! Server settings loaded via OrthoConfig.
//!
//! Values come from `GYM_*` environment variables, configuration files and
//! command-line flags; anything left unset falls back to the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JSON_LIMIT: usize = 64 * 1024;

/// Configuration values for the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GYM")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Largest accepted JSON request body, in bytes.
    pub json_limit: Option<usize>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Body size limit handed to the JSON extractors.
    pub fn json_limit(&self) -> usize {
        self.json_limit.unwrap_or(DEFAULT_JSON_LIMIT)
    }
}
