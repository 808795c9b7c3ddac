//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. `username` and `email` carry unique constraints
    /// named `users_username_key` and `users_email_key`.
    users (id) {
        /// Identity column assigned by PostgreSQL.
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}
