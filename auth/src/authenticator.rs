use chrono::Duration;

use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;

/// Authentication coordinator combining password hashing and token handling.
///
/// Holds the only copies of the work factor, the signing keys and the token
/// lifetime. Shared behind an `Arc` by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Validated authentication settings
    ///
    /// # Errors
    /// * `HashingFailed` - The configured work factor cannot be used
    pub fn new(settings: &AuthSettings) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(settings.hash_cost())?,
            token_codec: TokenCodec::new(settings),
            token_ttl: settings.token_ttl(),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Spend one verification on a password that has no account behind it.
    pub fn reject_unknown(&self, password: &str) {
        self.password_hasher.burn(password);
    }

    /// Issue an access token for `subject` with the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue(subject, self.token_ttl)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Token is expired, forged, or malformed
    pub fn validate_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_codec.validate(token)
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
