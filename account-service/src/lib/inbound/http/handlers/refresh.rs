use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::protected_error;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::inbound::http::middleware::BearerCredential;
use crate::inbound::http::router::AppState;

/// Trade the presented bearer token for a fresh one.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(credential): Extension<BearerCredential>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .auth_service
        .refresh(credential.as_str())
        .await
        .map_err(protected_error)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}
