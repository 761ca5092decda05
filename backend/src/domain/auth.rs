//! Authentication primitives: validated credentials and verified actors.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserId, UserValidationError};

/// Domain error returned when auth payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    EmptyName,
    EmptyPassword,
    Email(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Email(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Email(value)
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is a well-formed address.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct Registration {
    name: String,
    credentials: Credentials,
    is_host: bool,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        is_host: bool,
    ) -> Result<Self, AuthValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            credentials: Credentials::try_from_parts(email, password)?,
            is_host,
        })
    }

    /// Display name, trimmed.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login credentials for the new account.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether the account registers as a host.
    pub fn is_host(&self) -> bool {
        self.is_host
    }
}

/// A verified request identity, derived from a valid session token.
///
/// Services use the actor for ownership and role checks; it carries no
/// proof material of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub is_host: bool,
}
