use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::account::directory::AccountDirectory;
use crate::account::errors::AuthError;
use crate::account::errors::DirectoryError;
use crate::account::models::AccessToken;
use crate::account::models::Account;
use crate::account::models::LoginCommand;
use crate::account::models::SignUpCommand;
use crate::account::ports::AccountStore;
use crate::account::ports::AuthServicePort;

/// Domain service implementation for signup, login and token refresh.
///
/// Stateless per request; holds only shared handles.
pub struct AuthService<S>
where
    S: AccountStore,
{
    directory: AccountDirectory<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> AuthService<S>
where
    S: AccountStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `authenticator` - Shared hasher and token codec
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory: AccountDirectory::new(store),
            authenticator,
        }
    }

    fn issue(&self, identity: &str) -> Result<AccessToken, AuthError> {
        self.authenticator
            .issue_token(identity)
            .map(AccessToken::new)
            .map_err(|e| {
                tracing::error!(error = %e, "Token signing failed");
                AuthError::Internal(e.to_string())
            })
    }

    async fn touch(&self, identity: &str) -> Result<Account, AuthError> {
        self.directory
            .touch_last_authenticated(identity, Utc::now().timestamp())
            .await
            .map_err(|e| match e {
                DirectoryError::NotFound(_) => AuthError::InvalidCredentials,
                other => store_failure(other),
            })
    }
}

fn store_failure(error: DirectoryError) -> AuthError {
    tracing::error!(error = %error, "Account store failure");
    AuthError::StoreFailure(error.to_string())
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: AccountStore,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<AccessToken, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AuthError::Internal(e.to_string())
            })?;

        let account = self
            .directory
            .create(command.identity, command.display_name, password_hash)
            .await
            .map_err(|e| match e {
                DirectoryError::DuplicateIdentity(identity) => {
                    tracing::info!(identity = %identity, "Signup rejected: identity taken");
                    AuthError::DuplicateIdentity(identity)
                }
                other => store_failure(other),
            })?;

        tracing::info!(identity = %account.identity, "Account created");
        self.issue(account.identity.as_str())
    }

    async fn log_in(&self, command: LoginCommand) -> Result<AccessToken, AuthError> {
        let identity = command.identity.as_str();

        let account = match self.directory.find_by_identity(identity).await {
            Ok(account) => account,
            Err(DirectoryError::NotFound(_)) => {
                self.authenticator.reject_unknown(&command.password);
                tracing::warn!(identity = %identity, reason = "unknown identity", "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(store_failure(e)),
        };

        if !self
            .authenticator
            .verify_password(&command.password, &account.password_hash)
        {
            tracing::warn!(identity = %identity, reason = "password mismatch", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.touch(identity).await?;

        tracing::info!(identity = %identity, "Login succeeded");
        self.issue(identity)
    }

    async fn refresh(&self, token: &str) -> Result<AccessToken, AuthError> {
        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "Refresh rejected");
            AuthError::TokenInvalid
        })?;

        self.touch(&subject).await.map_err(|e| {
            if e == AuthError::InvalidCredentials {
                tracing::warn!(identity = %subject, reason = "account gone", "Refresh rejected");
            }
            e
        })?;

        tracing::debug!(identity = %subject, "Token refreshed");
        self.issue(&subject)
    }

    async fn current_account(&self, identity: &str) -> Result<Account, AuthError> {
        self.directory
            .find_by_identity(identity)
            .await
            .map_err(|e| match e {
                DirectoryError::NotFound(_) => {
                    tracing::warn!(identity = %identity, "Bearer subject has no account");
                    AuthError::InvalidCredentials
                }
                other => store_failure(other),
            })
    }
}
