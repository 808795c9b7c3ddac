//! User data model.
//!
//! [`User`] is a stored record with a storage-assigned identifier.
//! [`NewUser`] is the validated input to the create operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a username or email address.
pub const FIELD_MAX: usize = 255;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`FIELD_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Email was empty or whitespace.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email exceeded [`FIELD_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// Email was not of the form `local@domain`.
    #[error("email must look like name@domain")]
    InvalidEmail,
}

impl UserValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::EmptyEmail => "empty_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier read from storage.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login-style handle chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = username.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > FIELD_MAX {
            return Err(UserValidationError::UsernameTooLong { max: FIELD_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a username read back from storage without re-validating it.
    #[must_use]
    pub fn from_stored(username: String) -> Self {
        Self(username)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email address.
///
/// Only the shape `local@domain` is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`]; surrounding whitespace is trimmed.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = email.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > FIELD_MAX {
            return Err(UserValidationError::EmailTooLong { max: FIELD_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }

    /// Wrap an address read back from storage without re-validating it.
    ///
    /// Rows written before the current rules, or by other tools, are
    /// returned as stored.
    #[must_use]
    pub fn from_stored(email: String) -> Self {
        Self(email)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    email: EmailAddress,
}

impl NewUser {
    /// Build from already validated parts.
    #[must_use]
    pub fn new(username: Username, email: EmailAddress) -> Self {
        Self { username, email }
    }

    /// Validate raw strings, reporting the first failing field.
    pub fn try_from_strings(
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(Username::new(username)?, EmailAddress::new(email)?))
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Stored user record.
///
/// Serialises as `{ "id", "username", "email" }`.
///
/// # Examples
/// ```
/// use user_registry::domain::{User, UserId};
///
/// let user = User::try_from_parts(UserId::new(7), "alice", "a@x.com").expect("valid user");
/// let json = serde_json::to_value(&user).expect("serialise");
/// assert_eq!(json["id"], 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
}

impl User {
    /// Assemble a user from validated components.
    #[must_use]
    pub fn new(id: UserId, username: Username, email: EmailAddress) -> Self {
        Self { id, username, email }
    }

    /// Rebuild a user from a stored row, keeping its values verbatim.
    #[must_use]
    pub fn from_stored(id: UserId, username: String, email: String) -> Self {
        Self::new(
            id,
            Username::from_stored(username),
            EmailAddress::from_stored(email),
        )
    }

    /// Validate raw parts.
    pub fn try_from_parts(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(id, Username::new(username)?, EmailAddress::new(email)?))
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
