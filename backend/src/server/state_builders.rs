//! Builds HTTP handler state from the configured persistence backend.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use user_registry::domain::ports::{FixtureUserRepository, UserRepository};
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            warn!("no database pool configured; users are stored in memory");
            Arc::new(FixtureUserRepository::new())
        }
    }
}

/// Construct the shared HTTP state for all workers.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_repository(build_user_repository(config)))
}
