//! # Tokengate Models
//!
//! Domain models and request/response bodies:
//!
//! - [`users`]: the public [`User`], the stored [`UserRecord`], and [`SignUp`]
//! - [`auth`]: login, refresh and error bodies

pub mod auth;
pub mod users;

pub use auth::{AccessTokenResponse, ErrorResponse, LoginRequest, RefreshTokenRequest};
pub use users::{SignUp, User, UserQuery, UserRecord};
