use async_trait::async_trait;
use tokengate_core::{AppError, PasswordError};
use tokengate_models::{SignUp, UserQuery, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    EmailTaken,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UserStoreError> for AppError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::NotFound => AppError::not_found(err),
            UserStoreError::EmailTaken => AppError::bad_request(err),
            UserStoreError::Password(_) | UserStoreError::Database(_) => AppError::internal(err),
        }
    }
}

/// Persistent user storage and password hashing.
///
/// Implementations own the hashing scheme: `create` receives the plaintext
/// password and stores only its hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user. Fails with [`UserStoreError::EmailTaken`] if the email
    /// is already registered.
    async fn create(&self, sign_up: SignUp) -> Result<UserRecord, UserStoreError>;

    /// Looks a user up by id or email. Fails with [`UserStoreError::NotFound`].
    async fn find_one(&self, query: UserQuery) -> Result<UserRecord, UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_errors_map_to_status() {
        assert_eq!(
            AppError::from(UserStoreError::EmailTaken).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(UserStoreError::NotFound).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(UserStoreError::Database(sqlx::Error::PoolTimedOut)).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_email_taken_message() {
        assert_eq!(
            AppError::from(UserStoreError::EmailTaken).message(),
            "Email already exists"
        );
    }
}
