use auth::Authenticator;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Identity bound by the bearer gate, available to protected handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub identity: String,
}

/// The raw token the request was admitted with.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerCredential(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub account: AuthenticatedAccount,
    pub credential: BearerCredential,
}

/// Why the gate turned a request away. Logged only; every variant produces the same response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Authorization header is not valid text")]
    MalformedHeader,

    #[error("Unsupported authorization scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

/// Decide whether a request carrying `headers` may reach a protected operation.
///
/// # Errors
/// * `MissingCredentials` - No `Authorization` header or an empty token
/// * `MalformedHeader` - Header value is not visible ASCII
/// * `UnsupportedScheme` - Scheme is anything other than exactly `Bearer`
/// * `InvalidToken` - Token fails signature, structure or expiry checks
pub fn admit(headers: &HeaderMap, authenticator: &Authenticator) -> Result<Admission, Rejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(Rejection::MissingCredentials)?
        .to_str()
        .map_err(|_| Rejection::MalformedHeader)?;

    let (scheme, token) = match value.split_once(' ') {
        Some((scheme, token)) => (scheme, token.trim()),
        None => (value, ""),
    };

    if scheme != BEARER_SCHEME {
        return Err(Rejection::UnsupportedScheme(scheme.to_string()));
    }
    if token.is_empty() {
        return Err(Rejection::MissingCredentials);
    }

    let identity = authenticator.validate_token(token)?;

    Ok(Admission {
        account: AuthenticatedAccount { identity },
        credential: BearerCredential(token.to_string()),
    })
}

/// Middleware guarding protected routes with [`admit`].
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let admission = admit(req.headers(), &state.authenticator).map_err(|rejection| {
        tracing::warn!(
            reason = %rejection,
            method = %req.method(),
            path = %req.uri().path(),
            "Bearer gate rejected request"
        );
        ApiError::invalid_token().into_response()
    })?;

    tracing::debug!(identity = %admission.account.identity, "Bearer gate admitted request");

    req.extensions_mut().insert(admission.account);
    req.extensions_mut().insert(admission.credential);

    Ok(next.run(req).await)
}
