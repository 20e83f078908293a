//! JWT claim structures.
//!
//! - [`AccessClaims`]: short-lived access token payload
//! - [`RefreshClaims`]: long-lived refresh token payload
//!
//! Both carry the same identity fields; they differ in lifetime and in the
//! secret they are signed with.

use serde::{Deserialize, Serialize};

/// Anything a token can be minted for.
///
/// Implemented by the public user type and by [`RefreshClaims`], so a new
/// access token can be signed straight from a verified refresh token.
pub trait TokenSubject {
    /// Value of the `sub` claim (the user id)
    fn subject(&self) -> String;
    fn email(&self) -> &str;
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier
    pub jti: String,
}

/// JWT claims for refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier
    pub jti: String,
}

impl TokenSubject for RefreshClaims {
    fn subject(&self) -> String {
        self.sub.clone()
    }

    fn email(&self) -> &str {
        &self.email
    }
}
