use crate::error::ConfigError;

/// Which user store backs the collaborator contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserStoreKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub user_store: UserStoreKind,
    /// Required when `user_store` is [`UserStoreKind::Postgres`]
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("expected a port number, got {raw:?}"),
            })?,
            None => 3000,
        };

        let user_store = match get("USER_STORE").as_deref().map(str::trim) {
            None | Some("postgres") => UserStoreKind::Postgres,
            Some("memory") => UserStoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "USER_STORE",
                    reason: format!("expected \"postgres\" or \"memory\", got {other:?}"),
                });
            }
        };

        let database_url = get("DATABASE_URL");
        if user_store == UserStoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            user_store,
            database_url,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
