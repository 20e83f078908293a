/// Startup configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ")]
    SecretsMatch,

    #[error("COOKIE_SECRET must be at least {min} bytes, got {len}")]
    CookieSecretTooShort { len: usize, min: usize },
}
