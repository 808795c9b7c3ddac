//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UserDirectoryService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both user ports to a single [`UserDirectoryService`] over
    /// `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::domain::ports::FixtureUserRepository;
    /// use user_registry::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::from_repository(Arc::new(FixtureUserRepository::new()));
    /// let _query = state.users_query.clone();
    /// ```
    pub fn from_repository(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserDirectoryService::new(repository));
        Self::new(service.clone(), service)
    }
}
