use thiserror::Error;

/// Error for Identity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Failures surfaced by the data store collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Uniqueness violation: {0}")]
    UniqueViolation(String),

    #[error("Record not found")]
    NotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Account directory failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Identity already registered: {0}")]
    DuplicateIdentity(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Top-level error for authentication operations.
///
/// Display strings are for logs only. The HTTP layer replaces them with fixed
/// messages so clients cannot tell an unknown identity from a wrong password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Client errors
    #[error("Identity already registered: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    TokenInvalid,

    // Infrastructure errors
    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
