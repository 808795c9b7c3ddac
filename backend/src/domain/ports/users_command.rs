//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

/// Use-case port for creating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store `user` and return the record with its assigned identifier.
    async fn add_user(&self, user: NewUser) -> Result<User, Error>;
}
