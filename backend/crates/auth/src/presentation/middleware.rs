//! Auth Middleware
//!
//! Bearer-token gate for protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use platform::token::TokenService;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<TokenService>,
}

/// Middleware that requires a valid bearer token
///
/// - no `Authorization` header, or nothing after the scheme: 401
/// - a scheme other than `Bearer`, or a token that fails verification: 400
/// - otherwise the [`AuthenticatedUser`](crate::application::AuthenticatedUser)
///   is inserted into request extensions for downstream handlers
pub async fn require_bearer_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers())?;

    let authenticated = AuthenticateUseCase::new(state.tokens.clone()).execute(token)?;

    req.extensions_mut().insert(authenticated);

    Ok(next.run(req).await)
}

/// Token part of `Authorization: Bearer <token>`; the scheme is case-insensitive
///
/// A credential under any other scheme is present but unusable, so it is
/// `InvalidToken` rather than `MissingToken`.
pub fn extract_bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::MissingToken);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;

    let Some((scheme, token)) = value.trim().split_once(' ') else {
        return Err(AuthError::MissingToken);
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}
