//! JWT token management

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT manager for token issuance and validation
///
/// Holds the signing secret and token lifetime; both are injected at
/// construction so nothing reads configuration at call sites.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_secs,
        }
    }

    /// Token lifetime in seconds, as reported to clients at login.
    pub fn ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }

    /// Issue a signed token for a user
    pub fn issue_token(&self, user_id: i64, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing token for user: {}", username);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Validate a token and return its claims.
    ///
    /// The two failure modes are kept distinct: an expired token (good
    /// signature, deadline passed) yields `TokenExpired`, while a tampered
    /// or wrongly-signed token yields `InvalidToken`. The signature is
    /// checked before the expiry, so a tampered token is always reported
    /// as invalid regardless of its embedded expiry.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        // No leeway: the embedded expiry is the exact deadline.
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
                _ => Err(AuthError::InvalidToken),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let manager = JwtManager::new("test-secret-key", 3600);

        let token = manager.issue_token(1, "alice").unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let manager = JwtManager::new("test-secret-key", 3600);

        // Correctly signed, but the deadline passed an hour ago.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_raw(&claims, "test-secret-key");

        assert!(matches!(
            manager.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_key_is_invalid_not_expired() {
        let manager = JwtManager::new("test-secret-key", 3600);

        // Signed with a different key and already expired; the signature
        // failure must win.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_raw(&claims, "some-other-key");

        assert!(matches!(
            manager.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let manager = JwtManager::new("test-secret-key", 3600);
        let token = manager.issue_token(1, "alice").unwrap();

        // Swap the payload segment for one claiming a different user.
        let forged_claims = Claims {
            sub: "2".to_string(),
            username: "mallory".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        };
        let forged = encode_raw(&forged_claims, "some-other-key");
        let payload = forged.split('.').nth(1).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = payload;
        let tampered = parts.join(".");

        assert!(matches!(
            manager.validate_token(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let manager = JwtManager::new("test-secret-key", 3600);

        assert!(matches!(
            manager.validate_token("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
