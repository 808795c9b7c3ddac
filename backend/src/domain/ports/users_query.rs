//! Driving port for reading users.
//!
//! Inbound adapters call this port without importing persistence concerns.
//! Production backs it with [`crate::domain::UserDirectoryService`].

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user ordered by ascending identifier.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
