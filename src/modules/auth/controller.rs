use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use tokengate_core::AppError;
use tokengate_models::{
    AccessTokenResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, SignUp, User,
};

use super::service::AuthService;
use super::session::{AuthorizationHeader, Issued, REFRESH_TOKEN_COOKIE};
use crate::middleware::auth::AuthUser;
use crate::middleware::credentials::LocalAuth;
use crate::state::AppState;
use crate::validator::ValidatedJson;

type SessionResponse = (StatusCode, SignedCookieJar, AuthorizationHeader, Json<User>);

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = SignUp,
    responses(
        (status = 201, description = "User registered; access token in the Authorization header, refresh token in the refreshToken cookie", body = User),
        (status = 400, description = "Malformed body or email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedJson(sign_up): ValidatedJson<SignUp>,
) -> Result<SessionResponse, AppError> {
    let user = AuthService::register(state.users.as_ref(), sign_up).await?;

    let Issued { user, effects } = state.issuer.issue(user)?;
    let (jar, authorization) = effects.apply(jar);

    Ok((StatusCode::CREATED, jar, authorization, Json(user)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; access token in the Authorization header, refresh token in the refreshToken cookie", body = User),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    LocalAuth(user): LocalAuth,
) -> Result<SessionResponse, AppError> {
    let Issued { user, effects } = state.issuer.issue(user)?;
    let (jar, authorization) = effects.apply(jar);

    Ok((StatusCode::OK, jar, authorization, Json(user)))
}

/// Exchange a refresh token for a new access token
///
/// The token is read from the JSON body, falling back to the signed
/// `refreshToken` cookie.
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 403, description = "Invalid or expired refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let from_body = body.ok().and_then(|Json(body)| body.refresh_token);
    let token = from_body.or_else(|| {
        jar.get(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    });

    let access_token = AuthService::refresh_access_token(&state.tokens, token.as_deref())?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(AuthService::me(user))
}
