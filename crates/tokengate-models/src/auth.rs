//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export JWT claim types so handlers only need this crate
pub use tokengate_auth::{AccessClaims, RefreshClaims};

/// Login request with email and password.
#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Request to exchange a refresh token for a new access token.
///
/// The token may be omitted when the signed `refreshToken` cookie is sent
/// instead.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Error body written by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = 403)]
    pub status_code: u16,
    #[schema(example = "Invalid or expired refresh token")]
    pub message: String,
}
