//! User domain models and DTOs.
//!
//! [`User`] is the public principal handed to handlers and serialized into
//! responses. It has no password field, so a secret can never leave the
//! system through it. [`UserRecord`] is what the user store keeps, hash
//! included, and is deliberately not `Serialize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use tokengate_auth::TokenSubject;
use tokengate_core::{PasswordError, verify_password};

/// An authenticated user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TokenSubject for User {
    fn subject(&self) -> String {
        self.id.to_string()
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// A stored user, including the password hash.
#[derive(FromRow, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

impl UserRecord {
    /// Checks a plaintext password against the stored bcrypt hash.
    pub fn check_password(&self, plaintext: &str) -> Result<bool, PasswordError> {
        verify_password(plaintext, &self.password_hash)
    }

    /// Drops the password hash, leaving the public principal.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sign-up request body.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct SignUp {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
}

impl std::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}

/// Lookup key for [`UserRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    Id(Uuid),
    Email(String),
}
