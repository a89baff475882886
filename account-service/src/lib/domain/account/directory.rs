use std::sync::Arc;

use chrono::Utc;

use crate::account::errors::DirectoryError;
use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountField;
use crate::account::models::DisplayName;
use crate::account::models::Identity;
use crate::account::ports::AccountStore;

/// Account lookups and writes on top of the generic data store.
///
/// Sole owner of account persistence.
pub struct AccountDirectory<S>
where
    S: AccountStore,
{
    store: Arc<S>,
}

impl<S> Clone for AccountDirectory<S>
where
    S: AccountStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AccountDirectory<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an account. `last_authenticated` starts at the creation time.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Identity is already registered
    /// * `Store` - Data store operation failed
    pub async fn create(
        &self,
        identity: Identity,
        display_name: DisplayName,
        password_hash: String,
    ) -> Result<Account, DirectoryError> {
        let account = Account {
            identity,
            display_name,
            password_hash,
            last_authenticated: Utc::now().timestamp(),
        };

        self.store.insert(account).await.map_err(|e| match e {
            StoreError::UniqueViolation(identity) => DirectoryError::DuplicateIdentity(identity),
            other => DirectoryError::Store(other),
        })
    }

    /// Look up the account registered under `identity`.
    ///
    /// # Errors
    /// * `NotFound` - No account with this identity
    /// * `Store` - Data store operation failed
    pub async fn find_by_identity(&self, identity: &str) -> Result<Account, DirectoryError> {
        self.store
            .query_by_equality(AccountField::Identity, identity)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound(identity.to_string()))
    }

    /// Record a successful authentication. Setting the same timestamp twice is a no-op.
    ///
    /// # Errors
    /// * `NotFound` - Account vanished before the write
    /// * `Store` - Data store operation failed
    pub async fn touch_last_authenticated(
        &self,
        identity: &str,
        timestamp: i64,
    ) -> Result<Account, DirectoryError> {
        let mut account = self.find_by_identity(identity).await?;
        account.last_authenticated = timestamp;

        self.store.update(account).await.map_err(|e| match e {
            StoreError::NotFound => DirectoryError::NotFound(identity.to_string()),
            other => DirectoryError::Store(other),
        })
    }
}
