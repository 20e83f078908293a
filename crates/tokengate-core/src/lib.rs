//! # Tokengate Core
//!
//! Core types shared by every tokengate crate:
//!
//! - [`errors`]: [`AppError`], the HTTP-facing error with a status code
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use tokengate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::unauthorized("Invalid email or password");
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{
    MIN_HASH_COST, PasswordError, hash_password, hash_password_with_cost, verify_password,
};
