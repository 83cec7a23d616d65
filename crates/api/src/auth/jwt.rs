//! Validation of bearer tokens issued by the external identity provider.
//!
//! Reverie never handles passwords or sessions. The provider signs an HS256
//! JWT whose `sub` is the opaque user id; this module verifies it and exposes
//! the optional profile hints (`username`, `email`) used when a user row is
//! provisioned on first sight.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by provider tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's opaque user id.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Token issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Display name known to the provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Primary email address known to the provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Configuration for verifying provider tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Expected `iss` claim. When `None` the issuer is not checked.
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Load token verification settings from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `AUTH_JWT_SECRET` | **yes**  | --      |
    /// | `AUTH_JWT_ISSUER` | no       | --      |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let issuer = std::env::var("AUTH_JWT_ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self { secret, issuer }
    }
}

/// Validate and decode a provider token, returning the embedded [`Claims`].
///
/// Checks the signature and expiration, and the issuer when one is
/// configured. Audience is not checked.
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.validate_aud = false;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }
    Ok(token_data.claims)
}

/// Sign a token the way the identity provider does.
///
/// Used by local tooling and the integration tests; production tokens come
/// from the provider.
pub fn issue_token(
    config: &AuthConfig,
    user_id: &str,
    username: Option<&str>,
    email: Option<&str>,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_secs,
        iat: Some(now),
        iss: config.issuer.clone(),
        username: username.map(str::to_string),
        email: email.map(str::to_string),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
