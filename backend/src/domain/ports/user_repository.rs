//! Driven port for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { field: String } => "a user with this {field} already exists",
    }
}

/// Storage operations for user records.
///
/// Each call performs a single statement; there is no cross-call transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user ordered by ascending identifier.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Insert a user and return the stored record with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}

/// In-memory repository used when no database is configured and in tests.
///
/// Identifiers start at 1 and are never reused. Username and email are
/// unique, matching the database constraints.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    users: Vec<User>,
    last_id: i64,
}

impl FixtureUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `users`, assigning identifiers in order.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = NewUser>) -> Self {
        let repository = Self::new();
        {
            let mut state = repository.lock();
            for user in users {
                state.push(&user);
            }
        }
        repository
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl FixtureState {
    fn duplicate_field(&self, candidate: &NewUser) -> Option<&'static str> {
        self.users.iter().find_map(|existing| {
            if existing.username() == candidate.username() {
                Some("username")
            } else if existing.email() == candidate.email() {
                Some("email")
            } else {
                None
            }
        })
    }

    fn push(&mut self, user: &NewUser) -> User {
        self.last_id += 1;
        let stored = User::new(
            UserId::new(self.last_id),
            user.username().clone(),
            user.email().clone(),
        );
        self.users.push(stored.clone());
        stored
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock().users.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if let Some(field) = state.duplicate_field(user) {
            return Err(UserPersistenceError::duplicate(field));
        }
        Ok(state.push(user))
    }
}
