use crate::error::ConfigError;

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

/// Runtime environment, read from `ENVIRONMENT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Settings for the signed `refreshToken` cookie.
#[derive(Clone)]
pub struct CookieConfig {
    /// Signing secret; becomes the HMAC key of the cookie jar.
    pub secret: String,
    pub environment: Environment,
}

impl std::fmt::Debug for CookieConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieConfig")
            .field("secret", &"[redacted]")
            .field("environment", &self.environment)
            .finish()
    }
}

impl CookieConfig {
    pub fn new(secret: impl Into<String>, environment: Environment) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_COOKIE_SECRET_LEN {
            return Err(ConfigError::CookieSecretTooShort {
                len: secret.len(),
                min: MIN_COOKIE_SECRET_LEN,
            });
        }
        Ok(Self {
            secret,
            environment,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = get("COOKIE_SECRET").ok_or(ConfigError::Missing("COOKIE_SECRET"))?;
        let environment = get("ENVIRONMENT")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();
        Self::new(secret, environment)
    }

    /// `Secure` is only set on cookies in production.
    pub fn secure(&self) -> bool {
        self.environment.is_production()
    }
}
