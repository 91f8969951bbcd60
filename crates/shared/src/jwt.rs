//! JWT token issuance and verification.
//!
//! Single home for signing-key handling; nothing outside this module
//! touches token internals.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// JWT configuration.
///
/// The secret comes from [`crate::config::AuthConfig`]; there is no
/// `Default` impl and no fallback secret.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is invalid: bad signature, malformed, or wrong key.
    #[error("invalid token")]
    Invalid,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_ttl_secs", &self.config.token_ttl_secs)
            .field("secret", &"[hidden]")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a token for a user with the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Encoding` if token generation fails.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        self.issue_with_ttl(user_id, email, Duration::seconds(self.config.token_ttl_secs))
    }

    /// Issues a token with an explicit lifetime.
    ///
    /// A negative `ttl` produces an already-expired token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Encoding` if token generation fails.
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let expires_at = Utc::now() + ttl;
        let claims = Claims::new(user_id, email, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Verifies a token and returns its claims.
    ///
    /// Expiry is checked with zero leeway: a token is rejected the moment
    /// its `exp` passes. Every failure other than expiry collapses into
    /// `Invalid` so callers never act on partially-trusted claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::Invalid` for any other verification failure.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid,
            })
    }

    /// Returns the configured token lifetime in seconds.
    #[must_use]
    pub const fn token_ttl_secs(&self) -> i64 {
        self.config.token_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            token_ttl_secs: 3600,
        })
    }

    #[test]
    fn test_issue_token() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), "user@example.com").unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_round_trip() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "user@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expiry_matches_configured_ttl() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), "user@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert!((lifetime - service.token_ttl_secs()).abs() <= 1);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let token = service
            .issue_with_ttl(Uuid::new_v4(), "user@example.com", Duration::seconds(-3600))
            .unwrap();

        let result = service.verify(&token);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = create_test_service();
        let result = service.verify("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            token_ttl_secs: 3600,
        });

        let token = service.issue(Uuid::new_v4(), "user@example.com").unwrap();
        let result = other.verify(&token);
        assert!(matches!(result, Err(JwtError::Invalid)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4(), "user@example.com").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        let result = service.verify(&tampered);
        assert!(matches!(result, Err(JwtError::Invalid)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = create_test_service();
        let rendered = format!("{service:?}");
        assert!(!rendered.contains("test-secret-key-for-testing"));
    }
}
