use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use tokengate_auth::{AccessClaims, TokenError, TokenKind, TokenService};
use tokengate_core::AppError;
use tokengate_models::{SignUp, User, UserQuery};
use tokengate_observability::{
    track_login_failure, track_login_success, track_token_issued, track_token_refresh,
    track_user_registered,
};

use crate::modules::users::{UserStore, UserStoreError};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    UnknownEmail,

    #[error("Invalid email or password")]
    WrongPassword,

    #[error("Unauthorized")]
    PrincipalNotFound,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken(#[source] TokenError),

    #[error("Invalid or expired refresh token")]
    MissingRefreshToken,

    #[error(transparent)]
    Store(#[from] UserStoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownEmail | AuthError::WrongPassword | AuthError::PrincipalNotFound => {
                AppError::unauthorized(err.to_string())
            }
            AuthError::InvalidRefreshToken(_) | AuthError::MissingRefreshToken => {
                AppError::forbidden(err.to_string())
            }
            AuthError::Store(err) => err.into(),
            AuthError::Token(err) => err.into(),
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Creates a user through the store and returns it without its hash.
    #[instrument(skip_all, fields(email = %sign_up.email))]
    pub async fn register(users: &dyn UserStore, sign_up: SignUp) -> Result<User, AuthError> {
        let record = users.create(sign_up).await?;

        track_user_registered();
        info!(user_id = %record.id, "User registered");

        Ok(record.into_user())
    }

    /// Checks an email/password pair.
    ///
    /// Unknown email and wrong password are distinct variants but render
    /// the same message.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(
        users: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let record = match users.find_one(UserQuery::Email(email.to_string())).await {
            Ok(record) => record,
            Err(UserStoreError::NotFound) => {
                debug!("Login failed: unknown email");
                track_login_failure("unknown_email");
                return Err(AuthError::UnknownEmail);
            }
            Err(err) => return Err(err.into()),
        };

        let is_valid = record
            .check_password(password)
            .map_err(UserStoreError::from)?;

        if !is_valid {
            debug!(user_id = %record.id, "Login failed: wrong password");
            track_login_failure("wrong_password");
            return Err(AuthError::WrongPassword);
        }

        track_login_success();
        info!(user_id = %record.id, "User logged in");

        Ok(record.into_user())
    }

    /// Re-resolves the subject of a verified access token to a live user.
    #[instrument(skip_all, fields(sub = %claims.sub))]
    pub async fn verify_principal(
        users: &dyn UserStore,
        claims: &AccessClaims,
    ) -> Result<User, AuthError> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::PrincipalNotFound)?;

        match users.find_one(UserQuery::Id(id)).await {
            Ok(record) => Ok(record.into_user()),
            Err(UserStoreError::NotFound) => {
                warn!("Token subject no longer exists");
                Err(AuthError::PrincipalNotFound)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn me(user: User) -> User {
        user
    }

    /// Verifies a refresh token and signs a new access token for its subject.
    /// A request that carried no token counts as a rejected refresh.
    #[instrument(skip_all)]
    pub fn refresh_access_token(
        tokens: &TokenService,
        refresh_token: Option<&str>,
    ) -> Result<String, AuthError> {
        let Some(refresh_token) = refresh_token else {
            track_token_refresh(false);
            return Err(AuthError::MissingRefreshToken);
        };

        let claims = tokens.verify_refresh_token(refresh_token).map_err(|err| {
            debug!(error = %err, "Refresh token rejected");
            track_token_refresh(false);
            AuthError::InvalidRefreshToken(err)
        })?;

        let access_token = tokens.sign_access_token(&claims)?;

        track_token_refresh(true);
        track_token_issued(TokenKind::Access.as_str());

        Ok(access_token)
    }
}
