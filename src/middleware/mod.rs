//! Request guards.
//!
//! - [`auth`]: bearer-token guard yielding the authenticated [`User`](tokengate_models::User)
//! - [`credentials`]: email/password guard used by the login route
//!
//! # Authentication Flow
//!
//! 1. Client logs in (or registers) and receives `Authorization: Bearer <access>`
//!    plus a signed `refreshToken` cookie
//! 2. Client sends the access token on later requests
//! 3. `AuthUser` verifies it and re-resolves the user from the store
//! 4. When the access token expires the client calls `/auth/refresh-token`

pub mod auth;
pub mod credentials;
