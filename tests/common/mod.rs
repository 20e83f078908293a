#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, header};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tokengate::modules::auth::session::REFRESH_TOKEN_COOKIE;
use tokengate::modules::users::InMemoryUserStore;
use tokengate::router::init_router;
use tokengate::state::AppState;
use tokengate_auth::TokenService;
use tokengate_config::{AppConfig, JwtConfig};
use tokengate_core::MIN_HASH_COST;

pub const ACCESS_SECRET: &str = "test_access_secret_for_testing_purposes";
pub const REFRESH_SECRET: &str = "test_refresh_secret_for_testing_purposes";
pub const COOKIE_SECRET: &str =
    "test_cookie_secret_for_testing_purposes_0123456789_0123456789_abcdef";

pub fn test_config(environment: &str) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("JWT_ACCESS_SECRET", ACCESS_SECRET.to_string()),
        ("JWT_REFRESH_SECRET", REFRESH_SECRET.to_string()),
        ("COOKIE_SECRET", COOKIE_SECRET.to_string()),
        ("USER_STORE", "memory".to_string()),
        ("ENVIRONMENT", environment.to_string()),
        ("ALLOWED_ORIGINS", "http://localhost:5173".to_string()),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn setup_test_app() -> Router {
    setup_test_app_in("development")
}

pub fn setup_test_app_in(environment: &str) -> Router {
    let config = test_config(environment);
    let users = Arc::new(InMemoryUserStore::with_cost(MIN_HASH_COST));
    let state = AppState::new(&config, users).unwrap();
    init_router(state)
}

/// Token service sharing the test secrets, for decoding issued tokens.
pub fn test_tokens() -> TokenService {
    TokenService::new(&JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET).unwrap())
}

pub fn generate_unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// The full `Set-Cookie` header written for the refresh cookie.
pub fn refresh_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{REFRESH_TOKEN_COOKIE}=")))
        .map(str::to_string)
}

/// `refreshToken=<signed value>`, ready to send back in a `Cookie` header.
pub fn refresh_cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = refresh_set_cookie(response).unwrap();
    set_cookie.split(';').next().unwrap().trim().to_string()
}

/// Verifies the cookie signature and returns the refresh token inside it.
pub fn refresh_token_from(response: &Response<Body>) -> String {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, refresh_cookie_pair(response).parse().unwrap());

    let jar = SignedCookieJar::from_headers(&headers, Key::from(COOKIE_SECRET.as_bytes()));
    jar.get(REFRESH_TOKEN_COOKIE).unwrap().value().to_string()
}

pub fn access_token_from(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::AUTHORIZATION)
        .unwrap()
        .to_str()
        .unwrap()
        .strip_prefix("Bearer ")
        .unwrap()
        .to_string()
}

pub async fn register(app: &Router, email: &str, password: &str) -> Response<Body> {
    send(
        app,
        json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": email, "password": password, "name": "Test User" }),
        ),
    )
    .await
}
