//! # Tokengate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: access/refresh token secrets and lifetimes
//! - [`cookie`]: refresh-cookie signing key and `Secure` flag
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and user store backend
//!
//! Every config type has a `from_env` constructor and a `from_lookup`
//! constructor that takes any `Fn(&str) -> Option<String>`, which is what
//! the tests use instead of mutating the process environment.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod cookie;
pub mod cors;
pub mod error;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::{CookieConfig, Environment};
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::{ServerConfig, UserStoreKind};

/// All configuration needed to start the server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&get)?,
            jwt: JwtConfig::from_lookup(&get)?,
            cookie: CookieConfig::from_lookup(&get)?,
            cors: CorsConfig::from_lookup(&get),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_app_config_from_lookup() {
        let vars: HashMap<&str, String> = HashMap::from([
            ("JWT_ACCESS_SECRET", "access-secret".to_string()),
            ("JWT_REFRESH_SECRET", "refresh-secret".to_string()),
            ("COOKIE_SECRET", "c".repeat(64)),
            ("USER_STORE", "memory".to_string()),
            ("ENVIRONMENT", "production".to_string()),
        ]);

        let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.server.user_store, UserStoreKind::Memory);
        assert!(config.cookie.secure());
        assert_eq!(config.jwt.access_token_expiry, 900);
    }

    #[test]
    fn test_app_config_reports_first_missing_secret() {
        let vars: HashMap<&str, String> =
            HashMap::from([("USER_STORE", "memory".to_string())]);

        let err = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_ACCESS_SECRET")));
    }
}
