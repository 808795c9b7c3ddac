//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each method checks out one pooled connection and runs a single statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(EMAIL_CONSTRAINT) => "email",
        Some(USERNAME_CONSTRAINT) => "username",
        // Unnamed unique violations can only come from the username or email
        // constraints on this table; username is checked first.
        _ => "username",
    }
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::duplicate(duplicate_field(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

// Stored rows are returned verbatim; validation applies on the write path.
fn row_to_user(row: UserRow) -> User {
    let UserRow {
        id,
        username,
        email,
    } = row;
    User::from_stored(UserId::new(id), username, email)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_user(row))
    }
}

#[cfg(test)]
mod tests {
    //! Error-mapping coverage; database round trips live in
    //! `tests/diesel_user_repository.rs`.

    use super::*;
    use rstest::rstest;

    struct ConstraintInfo(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(ConstraintInfo(constraint)))
    }

    #[rstest]
    #[case(Some(USERNAME_CONSTRAINT), "username")]
    #[case(Some(EMAIL_CONSTRAINT), "email")]
    #[case(None, "username")]
    fn unique_violations_name_the_field(
        #[case] constraint: Option<&'static str>,
        #[case] field: &str,
    ) {
        let err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation, constraint));
        assert_eq!(err, UserPersistenceError::duplicate(field));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation, None))]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(
            map_diesel_error(error),
            UserPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn stored_rows_are_returned_verbatim() {
        let user = row_to_user(UserRow {
            id: 9,
            username: " legacy ".to_owned(),
            email: "n/a".to_owned(),
        });

        assert_eq!(user.id(), UserId::new(9));
        assert_eq!(user.username().as_ref(), " legacy ");
        assert_eq!(user.email().as_ref(), "n/a");
    }
}
