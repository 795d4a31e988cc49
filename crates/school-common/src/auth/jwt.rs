//! JWT utilities for authentication
//!
//! Signs and verifies the bearer tokens handed out on register and login,
//! using the `jsonwebtoken` crate. The subject claim carries the account email.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The identity the token was issued for
    ///
    /// # Errors
    /// Returns `InvalidCredential` if the subject claim is missing or empty
    pub fn subject(&self) -> Result<&str, AppError> {
        self.sub
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AppError::InvalidCredential)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signed token with its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and default lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue a token for an identity with the default lifetime
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, subject: &str) -> Result<AccessToken, AppError> {
        self.issue_with_ttl(subject, Duration::seconds(self.access_token_expiry))
    }

    /// Issue a token for an identity with an explicit lifetime
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let token = self.sign(&claims)?;
        Ok(AccessToken {
            token,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Sign arbitrary claims
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Decode and validate a token's signature and expiry
    ///
    /// # Errors
    /// Returns `InvalidCredential` if the token is malformed, tampered with, or expired
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidCredential)
    }

    /// Verify a token and return its subject
    ///
    /// # Errors
    /// Returns `InvalidCredential` if verification fails or the subject is absent
    pub fn verify_subject(&self, token: &str) -> Result<String, AppError> {
        let claims = self.verify(token)?;
        claims.subject().map(ToString::to_string)
    }

    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
