use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::account::errors::DisplayNameError;
use crate::account::errors::IdentityError;
use crate::account::models::DisplayName;
use crate::account::models::Identity;
use crate::account::models::SignUpCommand;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .sign_up(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: String,
    name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid email: {0}")]
    Identity(#[from] IdentityError),

    #[error("Invalid name: {0}")]
    DisplayName(#[from] DisplayNameError),
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<SignUpCommand, ParseCreateUserRequestError> {
        let identity = Identity::new(self.email)?;
        let display_name = DisplayName::new(self.name)?;
        Ok(SignUpCommand::new(identity, display_name, self.password))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
