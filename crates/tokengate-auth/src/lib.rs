//! # Tokengate Auth
//!
//! Token claims and the token service.
//!
//! - [`claims`]: access and refresh claim structures, and [`TokenSubject`]
//! - [`jwt`]: [`TokenService`], which signs and verifies both token kinds
//!
//! Tokens are stateless HS256 JWTs. Nothing is stored server-side; a token is
//! valid exactly while its signature checks out and it has not expired.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{AccessClaims, RefreshClaims, TokenSubject};
pub use jwt::{TokenError, TokenKind, TokenService};
