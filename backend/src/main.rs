//! Backend entry-point: reads settings, wires services, and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use taxdesk::inbound::http::health::HealthState;
use taxdesk::settings::{BuildMode, settings_from_env};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        bind_addr = %settings.bind_addr,
        sweep_secs = settings.sweep_period.as_secs(),
        expose_verification_code = settings.expose_verification_code,
        "starting server"
    );

    let health_state = web::Data::new(HealthState::new());
    let (server, _sweeper) = create_server(health_state, ServerConfig::from(settings)).await?;
    server.await
}
