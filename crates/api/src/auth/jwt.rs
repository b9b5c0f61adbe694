//! JWT access-token validation.
//!
//! Accounts are authenticated by an external identity provider; this
//! server only validates the HS256-signed token it forwards. The
//! subject claim is the account's database id and the optional email
//! claim feeds account bootstrap on first contact.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use fablehouse_core::types::DbId;

/// Claims carried by every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the account's database id.
    pub sub: DbId,
    /// Account email, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

/// Settings for token validation and local minting.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Lifetime in minutes for locally minted tokens (default 60).
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read JWT settings from the environment.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64"),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Mint an HS256 access token for the given account.
///
/// Production tokens come from the identity provider; this exists for
/// integration tests and local development against the same secret.
pub fn generate_access_token(
    account_id: DbId,
    email: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: account_id,
        email: email.map(str::to_string),
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check the signature and expiration, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, checks exp
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-signing-secret-0123456789".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    #[test]
    fn round_trips_account_claims() {
        let config = test_config();
        let token = generate_access_token(42, Some("mira@example.com"), &config)
            .expect("token should mint");

        let claims = validate_token(&token, &config).expect("token should validate");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email.as_deref(), Some("mira@example.com"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn accepts_token_without_email() {
        let config = test_config();
        let token = generate_access_token(7, None, &config).expect("token should mint");

        let claims = validate_token(&token, &config).expect("token should validate");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, None);
    }

    #[test]
    fn rejects_expired_token() {
        let config = test_config();

        // Expired five minutes ago, well past the default 60s leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: None,
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn rejects_foreign_signature() {
        let minting = test_config();
        let validating = JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            access_token_expiry_mins: 60,
        };

        let token = generate_access_token(1, None, &minting).expect("token should mint");
        assert!(validate_token(&token, &validating).is_err());
    }
}
