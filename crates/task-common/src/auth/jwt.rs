//! JWT utilities for authentication
//!
//! Access and refresh tokens are signed with two distinct HS256 keys, so a
//! token of one kind never verifies as the other. Every verification failure
//! (bad signature, malformed token, expiry) collapses into
//! `AppError::InvalidToken`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use task_core::UserId;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// Which of the two token families a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
///
/// Serialized as `{ "userId": .., "iat": .., "exp": .., "jti": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Owner of the token
    pub user_id: UserId,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id, keeps tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    fn new(user_id: UserId, lifetime_secs: i64) -> Result<Self, AppError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Token lifetime of {lifetime_secs}s is out of range"
                ))
            })?;

        Ok(Self {
            user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Freshly issued access + refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: i64,
}

impl SigningKeys {
    fn new(secret: &str, lifetime_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }
}

/// JWT service for minting and verifying access and refresh tokens
#[derive(Clone)]
pub struct JwtService {
    access: SigningKeys,
    refresh: SigningKeys,
    validation: Validation,
}

impl JwtService {
    /// Create a new JWT service from two secrets and two lifetimes (seconds)
    #[must_use]
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: SigningKeys::new(access_secret, access_token_expiry),
            refresh: SigningKeys::new(refresh_secret, refresh_token_expiry),
            validation,
        }
    }

    /// Create a JWT service from configuration
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.access_secret,
            &config.refresh_secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.access.lifetime_secs
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh.lifetime_secs
    }

    /// Mint a fresh access token and refresh token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: UserId) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.encode_token(user_id, TokenKind::Access)?,
            refresh_token: self.encode_token(user_id, TokenKind::Refresh)?,
        })
    }

    /// Mint an access token only
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, user_id: UserId) -> Result<String, AppError> {
        self.encode_token(user_id, TokenKind::Access)
    }

    /// Verify an access token and return its claims
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` if the token is invalid or expired
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenKind::Access)
    }

    /// Verify a refresh token and return its claims
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` if the token is invalid or expired
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenKind::Refresh)
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn encode_token(&self, user_id: UserId, kind: TokenKind) -> Result<String, AppError> {
        let keys = self.keys(kind);
        let claims = Claims::new(user_id, keys.lifetime_secs)?;

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    fn decode_token(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access.lifetime_secs)
            .field("refresh_token_expiry", &self.refresh.lifetime_secs)
            .finish_non_exhaustive()
    }
}
