use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use tokengate_core::AppError;
use tokengate_models::User;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Extractor that validates the bearer access token and provides the user
/// it was issued to.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = state.tokens.verify_access_token(token)?;
        let user = AuthService::verify_principal(state.users.as_ref(), &claims).await?;

        Ok(AuthUser(user))
    }
}
