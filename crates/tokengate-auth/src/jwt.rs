//! Access and refresh token signing and verification.
//!
//! [`TokenService`] is built once from a [`JwtConfig`] and holds one key pair
//! per token kind. Access tokens are signed with the access secret and
//! refresh tokens with the refresh secret, so a leaked access token can never
//! be replayed as a refresh token (or the other way round).
//!
//! # Example
//!
//! ```ignore
//! use tokengate_auth::TokenService;
//! use tokengate_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//!
//! let refresh = tokens.sign_refresh_token(&user)?;
//! let claims = tokens.verify_refresh_token(&refresh)?;
//! let access = tokens.sign_access_token(&claims)?;
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use uuid::Uuid;

use tokengate_config::JwtConfig;
use tokengate_core::AppError;

use crate::claims::{AccessClaims, RefreshClaims, TokenSubject};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to create token: {0}")]
    Encoding(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(message) => AppError::internal_error(message),
            TokenError::Expired | TokenError::Invalid => {
                AppError::unauthorized("Invalid or expired token")
            }
        }
    }
}

/// Which of the two token kinds a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Signs and verifies access and refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    access: SigningKeys,
    refresh: SigningKeys,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: SigningKeys::from_secret(&config.access_secret),
            refresh: SigningKeys::from_secret(&config.refresh_secret),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            validation,
        }
    }

    /// Signs a short-lived access token for `subject`.
    #[instrument(skip_all, fields(sub = %subject.subject()))]
    pub fn sign_access_token(&self, subject: &impl TokenSubject) -> Result<String, TokenError> {
        let (iat, exp) = issue_window(self.access_token_expiry);
        let claims = AccessClaims {
            sub: subject.subject(),
            email: subject.email().to_string(),
            exp,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        sign(&claims, &self.access.encoding)
    }

    /// Signs a long-lived refresh token for `subject`.
    #[instrument(skip_all, fields(sub = %subject.subject()))]
    pub fn sign_refresh_token(&self, subject: &impl TokenSubject) -> Result<String, TokenError> {
        let (iat, exp) = issue_window(self.refresh_token_expiry);
        let claims = RefreshClaims {
            sub: subject.subject(),
            email: subject.email().to_string(),
            exp,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        sign(&claims, &self.refresh.encoding)
    }

    /// Verifies signature and expiry against the access secret.
    #[instrument(skip_all)]
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        verify(token, &self.access.decoding, &self.validation)
    }

    /// Verifies signature and expiry against the refresh secret.
    #[instrument(skip_all)]
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        verify(token, &self.refresh.decoding, &self.validation)
    }
}

fn issue_window(lifetime_secs: i64) -> (usize, usize) {
    let now = Utc::now().timestamp() as usize;
    (now, now + lifetime_secs as usize)
}

fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> Result<String, TokenError> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| TokenError::Encoding(e.to_string()))
}

fn verify<T: DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<T, TokenError> {
    decode::<T>(token, key, validation)
        .map(|data| data.claims)
        .map_err(|e| {
            let err = TokenError::from(e);
            debug!(error = %err, "Token rejected");
            err
        })
}
