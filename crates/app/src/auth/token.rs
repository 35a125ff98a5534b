//! Signed access tokens (HS256 JWTs).

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::users::models::User;

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Token lifetime used when none is configured.
pub const DEFAULT_EXPIRY_MINUTES: i64 = 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must be at least {min_bytes} bytes")]
    WeakSecret { min_bytes: usize },

    #[error("token lifetime must be a positive number of minutes")]
    InvalidExpiry,

    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Token signing settings.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,

    /// Unique token identifier.
    pub jti: String,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    lifetime: SignedDuration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::WeakSecret`] when the secret is shorter than
    /// [`MIN_SECRET_BYTES`], or [`TokenError::InvalidExpiry`] for a
    /// non-positive lifetime.
    pub fn new(config: &TokenConfig) -> Result<Self, TokenError> {
        if config.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret {
                min_bytes: MIN_SECRET_BYTES,
            });
        }

        if config.expiry_minutes <= 0 {
            return Err(TokenError::InvalidExpiry);
        }

        let lifetime = config
            .expiry_minutes
            .checked_mul(60)
            .map(SignedDuration::from_secs)
            .ok_or(TokenError::InvalidExpiry)?;

        Ok(Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            lifetime,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Sign a token for `user`, issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry overflows or signing fails.
    pub fn issue(&self, user: &User, now: Timestamp) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add(self.lifetime)
            .map_err(|_| TokenError::InvalidExpiry)?;

        let claims = Claims {
            sub: user.uuid.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
            jti: Uuid::now_v7().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Decode `token`, checking signature, issuer, audience and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] when any check fails.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
