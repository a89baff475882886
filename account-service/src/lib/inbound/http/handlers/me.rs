use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::protected_error;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    state
        .auth_service
        .current_account(&authenticated.identity)
        .await
        .map_err(protected_error)
        .map(|account| ApiSuccess::new(StatusCode::OK, (&account).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub email: String,
    pub name: String,
    pub last_authenticated: i64,
}

impl From<&Account> for AccountResponseData {
    fn from(account: &Account) -> Self {
        Self {
            email: account.identity.as_str().to_string(),
            name: account.display_name.as_str().to_string(),
            last_authenticated: account.last_authenticated,
        }
    }
}
