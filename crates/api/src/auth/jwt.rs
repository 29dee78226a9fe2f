//! JWT access and refresh tokens.
//!
//! Both tokens are HS256-signed JWTs carrying the same [`Claims`] shape but
//! signed with different secrets, so a refresh token is never accepted as an
//! access token and vice versa.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pdfgen_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// The user's role name (`"normal"` or `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in hours (default: 168).
    pub refresh_token_expiry_hours: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in hours.
const DEFAULT_REFRESH_EXPIRY_HOURS: i64 = 168;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_ACCESS_SECRET`        | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_HOURS` | no       | `168`   |
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or empty.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .expect("JWT_ACCESS_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "JWT_ACCESS_SECRET must not be empty");

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .expect("JWT_REFRESH_SECRET must be set in the environment");
        assert!(!refresh_secret.is_empty(), "JWT_REFRESH_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_hours: i64 = std::env::var("JWT_REFRESH_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_HOURS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_hours,
        }
    }
}

/// An access token and the refresh token that can replace it.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issue a fresh access/refresh pair for a user.
pub fn generate_token_pair(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let access_token = sign(
        user_id,
        role,
        config.access_token_expiry_mins * 60,
        &config.access_secret,
    )?;
    let refresh_token = sign(
        user_id,
        role,
        config.refresh_token_expiry_hours * 3600,
        &config.refresh_secret,
    )?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Validate and decode an access token.
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, &config.access_secret)
}

/// Validate and decode a refresh token.
pub fn validate_refresh_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, &config.refresh_secret)
}

fn sign(
    user_id: DbId,
    role: &str,
    ttl_secs: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-that-is-long-enough".to_string(),
            refresh_secret: "refresh-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_hours: 168,
        }
    }

    #[test]
    fn test_generate_and_validate_pair() {
        let config = test_config();
        let user_id = DbId::new_v4();
        let pair = generate_token_pair(user_id, "normal", &config).expect("pair should sign");

        let access = validate_access_token(&pair.access_token, &config).unwrap();
        assert_eq!(access.sub, user_id);
        assert_eq!(access.role, "normal");
        assert_eq!(access.exp - access.iat, 15 * 60);

        let refresh = validate_refresh_token(&pair.refresh_token, &config).unwrap();
        assert_eq!(refresh.sub, user_id);
        assert_eq!(refresh.exp - refresh.iat, 168 * 3600);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let config = test_config();
        let pair = generate_token_pair(DbId::new_v4(), "normal", &config).unwrap();

        assert!(validate_access_token(&pair.refresh_token, &config).is_err());
        assert!(validate_refresh_token(&pair.access_token, &config).is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well past the default 60-second leeway.
        let token = sign(DbId::new_v4(), "normal", -300, &config.access_secret).unwrap();

        assert!(validate_access_token(&token, &config).is_err());
    }
}
