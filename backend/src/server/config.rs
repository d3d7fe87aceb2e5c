//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use taxdesk::settings::{AppSettings, SeedAccountant};

/// Settings the server needs at construction time.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) sweep_period: Duration,
    pub(crate) expose_verification_code: bool,
    pub(crate) seed_accountant: Option<SeedAccountant>,
}

impl ServerConfig {
    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<AppSettings> for ServerConfig {
    fn from(settings: AppSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
            sweep_period: settings.sweep_period,
            expose_verification_code: settings.expose_verification_code,
            seed_accountant: settings.seed_accountant,
        }
    }
}
