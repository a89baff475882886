use thiserror::Error;

/// Error type for token operations.
///
/// The variants exist for logging. Callers facing clients should collapse every
/// validation failure into a single "invalid token" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token has no subject")]
    MissingSubject,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => TokenError::MissingSubject,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}
