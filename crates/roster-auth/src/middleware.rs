//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::jwt::{Claims, JwtManager};

/// Paths that bypass authentication entirely.
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/healthz", "/auth/login", "/auth/register"];

/// Authenticated user information, resolved from a validated token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl AuthUser {
    /// Create from JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub.parse().unwrap_or(0),
            username: claims.username.clone(),
        }
    }
}

/// Check whether a request path is on the public allow-list
fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Extract bearer token from authorization header
fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;
    // An empty credential is a malformed header, not a bad signature
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Authentication middleware
///
/// Allow-listed paths pass through untouched. Every other request must
/// carry a valid bearer token; on success the resolved [`AuthUser`] is
/// added to the request extensions for downstream handlers.
///
/// Missing or expired credentials reject with 401. An invalid signature
/// rejects with 403 and is the only case logged as a warning, since it
/// indicates a tampered or wrongly-keyed token rather than a routine
/// re-login situation.
pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;

    let claims = jwt_manager.validate_token(token).inspect_err(|e| {
        if matches!(e, AuthError::InvalidToken) {
            warn!(
                "Rejected request to {} with invalid token signature",
                request.uri().path()
            );
        }
    })?;

    let user = AuthUser::from_claims(&claims);
    debug!("Authenticated user: {}", user.username);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/health"));
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/auth/register"));
        assert!(!is_public_path("/api/users"));
        assert!(!is_public_path("/auth/login/extra"));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(matches!(
            extract_bearer_token("Basic dXNlcjpwYXNz"),
            Err(AuthError::InvalidAuthHeader)
        ));
        assert!(matches!(
            extract_bearer_token("abc.def.ghi"),
            Err(AuthError::InvalidAuthHeader)
        ));
        assert!(matches!(
            extract_bearer_token("Bearer "),
            Err(AuthError::InvalidAuthHeader)
        ));
    }
}
