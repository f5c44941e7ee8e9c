//! Console entry-point: loads settings, wires adapters and serves pages.

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use console::inbound::http::health::HealthState;
use console::inbound::http::session_config::{BuildMode, session_settings_from_env};
use console::server::{ConsoleSettings, ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ConsoleSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("load settings: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let http_state = web::Data::new(build_http_state(&settings, Arc::new(DefaultClock))?);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        http_state,
        ServerConfig::new(session, bind_addr),
    )?;
    info!(%bind_addr, "console listening");
    server.await
}
