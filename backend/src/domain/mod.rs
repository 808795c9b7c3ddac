//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed user entities and the error payload shared
//! by the HTTP and persistence adapters. Adapters depend on this module; it
//! depends on neither of them.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and its stable identifier.
//! - User, NewUser, UserId, Username, EmailAddress: user records and their
//!   validated fields.
//! - TraceId: per-request correlation identifier.
//! - UserDirectoryService: implementation of the user driving ports.

pub mod error;
pub mod ports;
mod trace_id;
mod user;
mod user_directory;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, FIELD_MAX, NewUser, User, UserId, UserValidationError, Username,
};
pub use self::user_directory::UserDirectoryService;
