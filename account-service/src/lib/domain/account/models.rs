use std::fmt;

use email_address::EmailAddress;
use email_address::Options;

use crate::account::errors::DisplayNameError;
use crate::account::errors::IdentityError;

/// User account entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub identity: Identity,
    pub display_name: DisplayName,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Unix timestamp (seconds) of the last signup, login or refresh
    pub last_authenticated: i64,
}

/// Account identity type
///
/// An email address, compared case-sensitively and stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create a new validated identity.
    ///
    /// Only a bare address is accepted; `Name <addr>` mailboxes are refused.
    ///
    /// # Arguments
    /// * `identity` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322 or carries display text
    pub fn new(identity: String) -> Result<Self, IdentityError> {
        EmailAddress::parse_with_options(&identity, Options::default().without_display_text())
            .map(|_| Identity(identity))
            .map_err(|e| IdentityError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 128;

    /// Create a new display name.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooLong` - More than 128 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Blank);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account attributes the data store can filter on by equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Identity,
    DisplayName,
}

impl AccountField {
    pub fn matches(&self, account: &Account, value: &str) -> bool {
        match self {
            AccountField::Identity => account.identity.as_str() == value,
            AccountField::DisplayName => account.display_name.as_str() == value,
        }
    }
}

/// Signed bearer token handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Command to register a new account
#[derive(Debug)]
pub struct SignUpCommand {
    pub identity: Identity,
    pub display_name: DisplayName,
    pub password: String,
}

impl SignUpCommand {
    /// Construct a new sign up command.
    ///
    /// # Arguments
    /// * `identity` - Validated identity
    /// * `display_name` - Validated display name
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(identity: Identity, display_name: DisplayName, password: String) -> Self {
        Self {
            identity,
            display_name,
            password,
        }
    }
}

/// Command to log in with an identity and password
#[derive(Debug)]
pub struct LoginCommand {
    pub identity: Identity,
    pub password: String,
}

impl LoginCommand {
    pub fn new(identity: Identity, password: String) -> Self {
        Self { identity, password }
    }
}
