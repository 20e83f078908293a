use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Cheapest cost bcrypt accepts. Only for tests and local stores.
pub const MIN_HASH_COST: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(#[source] bcrypt::BcryptError),

    #[error("Failed to verify password: {0}")]
    Verify(#[source] bcrypt::BcryptError),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::internal(err)
    }
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    hash(password, cost).map_err(PasswordError::Hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(PasswordError::Verify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_hash_and_verify_round() {
        let hash = hash_password_with_cost("pw", MIN_HASH_COST).unwrap();
        assert_ne!(hash, "pw");
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn test_invalid_hash_is_an_error() {
        let err = verify_password("pw", "not_a_valid_bcrypt_hash").unwrap_err();
        assert!(matches!(err, PasswordError::Verify(_)));

        let app_error: AppError = err.into();
        assert_eq!(app_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
