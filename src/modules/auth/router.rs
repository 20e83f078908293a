use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login, me, refresh_token, register};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/me", get(me))
}
