use axum::Json;
use axum::extract::{FromRequest, Request};

use tokengate_core::AppError;
use tokengate_models::{LoginRequest, User};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::json_rejection_error;

/// Extractor that reads `{email, password}` from the body and logs the user
/// in. Handlers taking it only run for valid credentials.
///
/// The fields are not format-checked: anything that is not a known
/// email/password pair is rejected with 401.
#[derive(Debug, Clone)]
pub struct LocalAuth(pub User);

impl FromRequest<AppState> for LocalAuth {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(credentials) = Json::<LoginRequest>::from_request(req, state)
            .await
            .map_err(json_rejection_error)?;

        let user = AuthService::login(
            state.users.as_ref(),
            &credentials.email,
            &credentials.password,
        )
        .await?;

        Ok(LocalAuth(user))
    }
}
