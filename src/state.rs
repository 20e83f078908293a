use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use tokengate_auth::TokenService;
use tokengate_config::{AppConfig, CorsConfig};

use crate::modules::auth::session::TokenIssuer;
use crate::modules::users::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub issuer: TokenIssuer,
    pub cookie_key: Key,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(config: &AppConfig, users: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        let tokens = TokenService::new(&config.jwt);
        let issuer = TokenIssuer::new(tokens.clone(), &config.cookie);
        let cookie_key = Key::try_from(config.cookie.secret.as_bytes())
            .map_err(|e| anyhow!("Invalid COOKIE_SECRET: {e:?}"))?;

        Ok(Self {
            users,
            tokens,
            issuer,
            cookie_key,
            cors_config: config.cors.clone(),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
