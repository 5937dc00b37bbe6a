//! Token service
//!
//! Issues and validates the HS256-signed access/refresh token pair.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

/// Token service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 secret (at least 32 bytes)
    pub secret: String,
    /// Access token lifetime in hours
    pub access_ttl_hours: i64,
    /// Refresh token lifetime in hours
    pub refresh_ttl_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Public user id
    pub uid: String,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a refresh token: the subject only, no profile data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub uid: String,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

trait Expiring {
    fn exp(&self) -> i64;
    fn token_type(&self) -> &str;
}

impl Expiring for Claims {
    fn exp(&self) -> i64 {
        self.exp
    }
    fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl Expiring for RefreshClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
    fn token_type(&self) -> &str {
        &self.token_type
    }
}

/// Freshly issued token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JwtError {
    #[error("{0}")]
    InvalidToken(String),

    #[error("token expired")]
    Expired,

    #[error("expected a {expected} token")]
    WrongTokenType { expected: &'static str },

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access/refresh pair for a user, starting now
    pub fn issue(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        user_id: &str,
    ) -> Result<TokenPair, JwtError> {
        self.issue_at(Utc::now().timestamp(), email, first_name, last_name, user_id)
    }

    /// Issue a pair as if the current time were `now` (Unix seconds)
    pub fn issue_at(
        &self,
        now: i64,
        email: &str,
        first_name: &str,
        last_name: &str,
        user_id: &str,
    ) -> Result<TokenPair, JwtError> {
        let access = Claims {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            uid: user_id.to_string(),
            token_type: ACCESS_TOKEN.to_string(),
            iat: now,
            exp: now + Duration::hours(self.config.access_ttl_hours).num_seconds(),
        };
        let refresh = RefreshClaims {
            uid: user_id.to_string(),
            token_type: REFRESH_TOKEN.to_string(),
            iat: now,
            exp: now + Duration::hours(self.config.refresh_ttl_hours).num_seconds(),
        };

        Ok(TokenPair {
            token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
        })
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate an access token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_checked(token, ACCESS_TOKEN)
    }

    /// Validate a refresh token and return its claims
    pub fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.decode_checked(token, REFRESH_TOKEN)
    }

    /// Signature and structure first, then expiry against the clock with no
    /// leeway, then the token type.
    fn decode_checked<T>(&self, token: &str, expected: &'static str) -> Result<T, JwtError>
    where
        T: DeserializeOwned + Expiring,
    {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<T>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(format!("the token is invalid: {e}")))?
            .claims;

        if claims.exp() < Utc::now().timestamp() {
            return Err(JwtError::Expired);
        }
        if claims.token_type() != expected {
            return Err(JwtError::WrongTokenType { expected });
        }
        Ok(claims)
    }

    /// Extract the token from an `Authorization: Bearer <token>` value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated caller, built from access token claims by the auth middleware
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    /// Public user id
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.uid,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-with-at-least-32-bytes".into(),
            access_ttl_hours: 24,
            refresh_ttl_hours: 200,
        })
    }

    #[test]
    fn test_issue_then_validate_returns_identity() {
        let jwt = service();
        let pair = jwt.issue("ada@example.com", "Ada", "Lovelace", "user-1").unwrap();

        let claims = jwt.validate(&pair.token).unwrap();
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.last_name, "Lovelace");
        assert_eq!(claims.uid, "user-1");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);

        let refresh = jwt.validate_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.uid, "user-1");
        assert_eq!(refresh.exp - refresh.iat, 200 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected_after_signature_check() {
        let jwt = service();
        let issued = Utc::now().timestamp() - 25 * 3600;
        let pair = jwt.issue_at(issued, "a@b.co", "A", "B", "u").unwrap();

        let err = jwt.validate(&pair.token).unwrap_err();
        assert_eq!(err, JwtError::Expired);
        assert_eq!(err.to_string(), "token expired");

        // refresh token from the same pair is still inside its 200h window
        assert!(jwt.validate_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_tampered_or_foreign_token_is_invalid() {
        let jwt = service();
        let pair = jwt.issue("a@b.co", "A", "B", "u").unwrap();

        let mut tampered = pair.token.clone();
        tampered.push('x');
        assert!(matches!(
            jwt.validate(&tampered),
            Err(JwtError::InvalidToken(_))
        ));

        let other = JwtService::with_config(JwtConfig {
            secret: "a-completely-different-secret-of-32-bytes".into(),
            ..jwt.config.clone()
        });
        assert!(matches!(
            other.validate(&pair.token),
            Err(JwtError::InvalidToken(_))
        ));

        assert!(matches!(
            jwt.validate("not-a-jwt"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = service();
        let pair = jwt.issue("a@b.co", "A", "B", "u").unwrap();

        // refresh token lacks the identity claims of an access token
        assert!(jwt.validate(&pair.refresh_token).is_err());
        assert_eq!(
            jwt.validate_refresh(&pair.token).unwrap_err(),
            JwtError::WrongTokenType { expected: "refresh" }
        );
    }

    #[test]
    fn test_current_user_from_claims() {
        let jwt = service();
        let pair = jwt.issue("a@b.co", "A", "B", "u-9").unwrap();
        let user = CurrentUser::from(jwt.validate(&pair.token).unwrap());
        assert_eq!(user.id, "u-9");
        assert_eq!(user.email, "a@b.co");
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("abc"), None);
    }
}
