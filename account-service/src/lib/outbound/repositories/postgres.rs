use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountField;
use crate::account::models::DisplayName;
use crate::account::models::Identity;
use crate::account::ports::AccountStore;

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column(field: AccountField) -> &'static str {
    match field {
        AccountField::Identity => "identity",
        AccountField::DisplayName => "display_name",
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let identity: String = row.try_get("identity").map_err(unavailable)?;
    let display_name: String = row.try_get("display_name").map_err(unavailable)?;

    Ok(Account {
        identity: Identity::new(identity)
            .map_err(|e| StoreError::Unavailable(format!("corrupt identity column: {}", e)))?,
        display_name: DisplayName::new(display_name)
            .map_err(|e| StoreError::Unavailable(format!("corrupt display_name column: {}", e)))?,
        password_hash: row.try_get("password_hash").map_err(unavailable)?,
        last_authenticated: row.try_get("last_authenticated").map_err(unavailable)?,
    })
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (identity, display_name, password_hash, last_authenticated)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.identity.as_str())
        .bind(account.display_name.as_str())
        .bind(&account.password_hash)
        .bind(account.last_authenticated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return StoreError::UniqueViolation(account.identity.as_str().to_string());
                }
            }
            unavailable(e)
        })?;

        Ok(account)
    }

    async fn query_by_equality(
        &self,
        field: AccountField,
        value: &str,
    ) -> Result<Vec<Account>, StoreError> {
        let statement = format!(
            r#"
            SELECT identity, display_name, password_hash, last_authenticated
            FROM accounts
            WHERE {} = $1
            "#,
            column(field)
        );

        let rows = sqlx::query(&statement)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET display_name = $2, password_hash = $3, last_authenticated = $4
            WHERE identity = $1
            "#,
        )
        .bind(account.identity.as_str())
        .bind(account.display_name.as_str())
        .bind(&account.password_hash)
        .bind(account.last_authenticated)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(account)
    }

    async fn delete(&self, identity: &Identity) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE identity = $1
            "#,
        )
        .bind(identity.as_str())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
