use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::server::AppState;
use crate::types::UserId;

pub const INVALID_TOKEN_MESSAGE: &str = "Unauthorized - invalid token";

/// Authenticated principal extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.sub,
            role: claims.role,
        }
    }
}

/// Attaches an `AuthUser` to the request when a valid bearer token is present.
///
/// A request without an Authorization header passes through untouched and
/// handlers decide what an anonymous caller gets. A header that is present but
/// malformed, badly signed or expired is rejected here with 401.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_jwt_from_headers(&headers).map_err(|msg| {
        tracing::warn!("Rejected request: {}", msg);
        ApiError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?
    else {
        return Ok(next.run(request).await);
    };

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Rejected request: {}", e);
        ApiError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated user {} ({})", auth_user.username, auth_user.user_id);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header. `Ok(None)` when the header is absent.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        let token = token.trim();
        if token.is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
