use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::StoreError;
use crate::account::models::AccessToken;
use crate::account::models::Account;
use crate::account::models::AccountField;
use crate::account::models::Identity;
use crate::account::models::LoginCommand;
use crate::account::models::SignUpCommand;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first access token.
    ///
    /// # Arguments
    /// * `command` - Validated identity, display name and plain text password
    ///
    /// # Returns
    /// Access token bound to the new identity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Identity is already registered
    /// * `StoreFailure` - Data store operation failed
    /// * `Internal` - Hashing or signing failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<AccessToken, AuthError>;

    /// Check credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Identity and plain text password
    ///
    /// # Returns
    /// Access token bound to the identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or wrong password
    /// * `StoreFailure` - Data store operation failed
    /// * `Internal` - Signing failed
    async fn log_in(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Exchange a still-valid token for a new one with a full lifetime.
    ///
    /// # Arguments
    /// * `token` - Current access token
    ///
    /// # Errors
    /// * `TokenInvalid` - Token is expired, forged or malformed
    /// * `InvalidCredentials` - Token subject no longer has an account
    /// * `StoreFailure` - Data store operation failed
    /// * `Internal` - Signing failed
    async fn refresh(&self, token: &str) -> Result<AccessToken, AuthError>;

    /// Resolve an authenticated identity to its account.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Identity no longer has an account
    /// * `StoreFailure` - Data store operation failed
    async fn current_account(&self, identity: &str) -> Result<Account, AuthError>;
}

/// Generic data store capability for account records.
///
/// Each call is atomic. Uniqueness of `identity` is enforced by the store.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UniqueViolation` - Identity is already present
    /// * `Unavailable` - Store operation failed
    async fn insert(&self, account: Account) -> Result<Account, StoreError>;

    /// Retrieve every account whose `field` equals `value`.
    ///
    /// # Returns
    /// Matching accounts (empty when none match)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn query_by_equality(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Vec<Account>, StoreError>;

    /// Replace the stored record with the same identity.
    ///
    /// # Errors
    /// * `NotFound` - No account with this identity
    /// * `Unavailable` - Store operation failed
    async fn update(&self, account: Account) -> Result<Account, StoreError>;

    /// Remove the account with this identity.
    ///
    /// # Errors
    /// * `NotFound` - No account with this identity
    /// * `Unavailable` - Store operation failed
    async fn delete(&self, identity: &Identity) -> Result<(), StoreError>;
}
