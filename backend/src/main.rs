//! Backend entry-point: loads settings, wires REST endpoints and OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use booking_backend::inbound::http::health::HealthState;
use booking_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    // Reports end up in JSON log lines and response bodies.
    color_eyre::config::HookBuilder::default()
        .theme(color_eyre::config::Theme::new())
        .install()?;

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).context("failed to load settings")?;
    let config = ServerConfig::from_settings(&settings).context("invalid settings")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).context("failed to start server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.context("server terminated abnormally")
}
