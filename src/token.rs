//! Access token minting and verification.
//!
//! Tokens are HS256 JWTs signed with a shared symmetric key. The subject is
//! the username that owns accounts; handlers only ever see the decoded
//! [`TokenPayload`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest accepted signing key, in bytes.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid")]
    Invalid,
    #[error("invalid key size: must be at least {MIN_SECRET_KEY_SIZE} characters")]
    KeyTooShort,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Identity carried by a verified token.
///
/// Inserted into request extensions by the auth middleware and extracted by
/// handlers with `Extension<TokenPayload>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: Uuid,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
}

/// Registered JWT claims the payload is encoded as.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Creates and verifies access tokens.
pub trait TokenMaker: Send + Sync {
    /// Mint a token for `username` valid for `duration`.
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, TokenPayload), TokenError>;

    /// Check signature and expiry, returning the identity on success.
    fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError>;
}

/// [`TokenMaker`] backed by HS256 JSON Web Tokens.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtMaker {
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        if secret_key.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeyTooShort);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
        })
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, TokenPayload), TokenError> {
        let issued_at = Utc::now();
        let payload = TokenPayload {
            id: Uuid::new_v4(),
            username: username.to_string(),
            issued_at,
            expired_at: issued_at + duration,
        };

        let claims = Claims {
            jti: payload.id,
            sub: payload.username.clone(),
            iat: payload.issued_at.timestamp(),
            exp: payload.expired_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        let claims = data.claims;
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::Invalid)?;
        let expired_at = DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?;

        Ok(TokenPayload {
            id: claims.jti,
            username: claims.sub,
            issued_at,
            expired_at,
        })
    }
}
