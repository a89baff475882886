use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountField;
use crate::account::models::Identity;
use crate::account::ports::AccountStore;

/// Process-local account store keyed by identity.
///
/// Writes take the lock exclusively, so of two concurrent inserts for the
/// same identity exactly one succeeds.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        let key = account.identity.as_str().to_string();

        if accounts.contains_key(&key) {
            return Err(StoreError::UniqueViolation(key));
        }

        accounts.insert(key, account.clone());
        Ok(account)
    }

    async fn query_by_equality(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().await;

        let matches: Vec<Account> = match field {
            AccountField::Identity => accounts.get(value).cloned().into_iter().collect(),
            AccountField::DisplayName => accounts
                .values()
                .filter(|account| field.matches(account, value))
                .cloned()
                .collect(),
        };

        Ok(matches)
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(account.identity.as_str()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(account)
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, identity: &Identity) -> Result<(), StoreError> {
        self.accounts
            .write()
            .await
            .remove(identity.as_str())
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
