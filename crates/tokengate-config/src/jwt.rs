use crate::error::ConfigError;

/// Access tokens live for 15 minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 15 * 60;

/// Refresh tokens live for 7 days.
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 7 * 24 * 60 * 60;

/// Token signing configuration.
///
/// Access and refresh tokens are signed with different secrets so that a
/// token of one kind never verifies as the other.
#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"[redacted]")
            .field("refresh_secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Builds a config with the default lifetimes.
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            access_secret: get("JWT_ACCESS_SECRET")
                .ok_or(ConfigError::Missing("JWT_ACCESS_SECRET"))?,
            refresh_secret: get("JWT_REFRESH_SECRET")
                .ok_or(ConfigError::Missing("JWT_REFRESH_SECRET"))?,
            access_token_expiry: parse_seconds(&get, "JWT_ACCESS_EXPIRY")?
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: parse_seconds(&get, "JWT_REFRESH_EXPIRY")?
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_SECRET",
                reason: "must not be empty".to_string(),
            });
        }
        if self.refresh_secret.is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_SECRET",
                reason: "must not be empty".to_string(),
            });
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::SecretsMatch);
        }
        Ok(())
    }
}

fn parse_seconds<F>(get: &F, name: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<i64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(seconds)),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a positive number of seconds, got {raw:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "b"),
        ]))
        .unwrap();

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
    }

    #[test]
    fn test_custom_expiry() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "b"),
            ("JWT_ACCESS_EXPIRY", "60"),
            ("JWT_REFRESH_EXPIRY", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 3600);
    }

    #[test]
    fn test_missing_refresh_secret() {
        let err = JwtConfig::from_lookup(lookup(&[("JWT_ACCESS_SECRET", "a")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_REFRESH_SECRET")));
    }

    #[test]
    fn test_equal_secrets_rejected() {
        let err = JwtConfig::new("same", "same").unwrap_err();
        assert!(matches!(err, ConfigError::SecretsMatch));
    }

    #[test]
    fn test_invalid_expiry_rejected() {
        let err = JwtConfig::from_lookup(lookup(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "b"),
            ("JWT_ACCESS_EXPIRY", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                ..
            }
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = JwtConfig::new("access-secret-value", "refresh-secret-value").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("access-secret-value"));
        assert!(!debug.contains("refresh-secret-value"));
    }
}
