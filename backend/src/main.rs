//! User registry entry point: loads settings, prepares the database and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on, shutdown_signal};
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, run_pending_migrations};
use user_registry::settings::AppSettings;

fn startup_error(stage: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!(stage, error = %err, "startup failed");
    std::io::Error::other(format!("{stage}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| startup_error("settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("settings", err))?;

    if settings.run_migrations() {
        run_pending_migrations(settings.database_url())
            .await
            .map_err(|err| startup_error("migrations", err))?;
    }

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(|err| startup_error("database pool", err))?;

    let config = ServerConfig::new(bind_addr).with_db_pool(pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::metrics::default_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .map_err(|err| startup_error("bind", err))?;
    info!(%bind_addr, "user registry listening");

    actix_web::rt::spawn(drain_on(health_state, server.handle(), shutdown_signal()));
    server.await
}
