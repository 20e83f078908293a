use chrono::Utc;
use tokengate_auth::{TokenError, TokenService};
use tokengate_config::JwtConfig;
use tokengate_models::User;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig::new(
        "test_access_secret_for_testing_purposes",
        "test_refresh_secret_for_testing_purposes",
    )
    .unwrap()
}

fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: Some("Test User".to_string()),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_sign_and_verify_for_user() {
    let tokens = TokenService::new(&get_test_jwt_config());
    let user = test_user("test@example.com");

    let refresh = tokens.sign_refresh_token(&user).unwrap();
    let claims = tokens.verify_refresh_token(&refresh).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, user.email);
}

#[test]
fn test_configured_expiry_is_applied() {
    let mut config = get_test_jwt_config();
    config.access_token_expiry = 60;
    config.refresh_token_expiry = 120;
    let tokens = TokenService::new(&config);
    let user = test_user("test@example.com");

    let access = tokens
        .verify_access_token(&tokens.sign_access_token(&user).unwrap())
        .unwrap();
    let refresh = tokens
        .verify_refresh_token(&tokens.sign_refresh_token(&user).unwrap())
        .unwrap();

    assert_eq!(access.exp - access.iat, 60);
    assert_eq!(refresh.exp - refresh.iat, 120);
}

#[test]
fn test_default_expiry() {
    let tokens = TokenService::new(&get_test_jwt_config());
    let user = test_user("test@example.com");

    let access = tokens
        .verify_access_token(&tokens.sign_access_token(&user).unwrap())
        .unwrap();
    let refresh = tokens
        .verify_refresh_token(&tokens.sign_refresh_token(&user).unwrap())
        .unwrap();

    assert_eq!(access.exp - access.iat, 15 * 60);
    assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
}

#[test]
fn test_token_with_special_characters_in_email() {
    let tokens = TokenService::new(&get_test_jwt_config());
    let user = test_user("test+tag.name@sub.example.com");

    let access = tokens.sign_access_token(&user).unwrap();
    let claims = tokens.verify_access_token(&access).unwrap();

    assert_eq!(claims.email, "test+tag.name@sub.example.com");
}

#[test]
fn test_tokens_from_other_deployment_rejected() {
    let tokens = TokenService::new(&get_test_jwt_config());
    let other = TokenService::new(&JwtConfig::new("other_access", "other_refresh").unwrap());
    let user = test_user("test@example.com");

    let refresh = other.sign_refresh_token(&user).unwrap();
    assert!(matches!(
        tokens.verify_refresh_token(&refresh),
        Err(TokenError::Invalid)
    ));

    let access = other.sign_access_token(&user).unwrap();
    assert!(matches!(
        tokens.verify_access_token(&access),
        Err(TokenError::Invalid)
    ));
}

#[test]
fn test_verify_token_malformed() {
    let tokens = TokenService::new(&get_test_jwt_config());

    for malformed in ["", "invalid.token.here", "a.b", "not-a-jwt"] {
        assert!(tokens.verify_refresh_token(malformed).is_err());
        assert!(tokens.verify_access_token(malformed).is_err());
    }
}
