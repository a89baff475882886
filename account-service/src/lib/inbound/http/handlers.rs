use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AuthError;
use crate::account::models::AccessToken;

pub mod create_user;
pub mod health;
pub mod login;
pub mod me;
pub mod refresh;

pub const DUPLICATE_IDENTITY: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INVALID_TOKEN: &str = "Could not validate credentials";
pub const GENERIC_FAILURE: &str = "Bad request";
pub const INVALID_BODY: &str = "Invalid request body";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing failures. Messages are fixed strings, never internal detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
}

impl ApiError {
    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorBody { detail })).into_response()
            }
            ApiError::Conflict(detail) => {
                (StatusCode::CONFLICT, Json(ApiErrorBody { detail })).into_response()
            }
            ApiError::Unauthorized(detail) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(ApiErrorBody { detail }),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest(INVALID_BODY.to_string())
    }
}

/// Default mapping, used by the public signup and login routes.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateIdentity(_) => ApiError::Conflict(DUPLICATE_IDENTITY.to_string()),
            AuthError::InvalidCredentials => {
                ApiError::BadRequest(INVALID_CREDENTIALS.to_string())
            }
            AuthError::TokenInvalid => ApiError::invalid_token(),
            AuthError::StoreFailure(_) | AuthError::Internal(_) => {
                ApiError::BadRequest(GENERIC_FAILURE.to_string())
            }
        }
    }
}

/// Mapping for routes behind the bearer gate, where any credential failure is a 401.
pub fn protected_error(err: AuthError) -> ApiError {
    match err {
        AuthError::InvalidCredentials | AuthError::TokenInvalid => ApiError::invalid_token(),
        other => ApiError::from(other),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<AccessToken> for TokenResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.into_inner(),
            token_type: "bearer".to_string(),
        }
    }
}
