//! Session side effects for a freshly authenticated user.
//!
//! [`TokenIssuer::issue`] signs an access/refresh pair and returns the user
//! untouched together with the writes the transport layer must perform:
//! an `Authorization: Bearer <access>` response header and a signed,
//! HTTP-only `refreshToken` cookie. Nothing is written until the handler
//! calls [`SessionEffects::apply`].

use axum::http::{HeaderName, HeaderValue, header};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tracing::instrument;

use tokengate_auth::{TokenKind, TokenService};
use tokengate_config::CookieConfig;
use tokengate_core::AppError;
use tokengate_models::User;
use tokengate_observability::track_token_issued;

/// Name of the refresh-token cookie.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Response parts that carry the access token header.
pub type AuthorizationHeader = [(HeaderName, HeaderValue); 1];

#[derive(Debug)]
pub struct SessionEffects {
    pub authorization: HeaderValue,
    pub refresh_cookie: Cookie<'static>,
}

impl SessionEffects {
    /// Adds the refresh cookie to `jar` (signing it) and pairs it with the
    /// authorization header, ready to be returned from a handler.
    pub fn apply(self, jar: SignedCookieJar) -> (SignedCookieJar, AuthorizationHeader) {
        (
            jar.add(self.refresh_cookie),
            [(header::AUTHORIZATION, self.authorization)],
        )
    }
}

#[derive(Debug)]
pub struct Issued {
    pub user: User,
    pub effects: SessionEffects,
}

#[derive(Clone, Debug)]
pub struct TokenIssuer {
    tokens: TokenService,
    secure_cookie: bool,
}

impl TokenIssuer {
    pub fn new(tokens: TokenService, cookie: &CookieConfig) -> Self {
        Self {
            tokens,
            secure_cookie: cookie.secure(),
        }
    }

    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn issue(&self, user: User) -> Result<Issued, AppError> {
        let access_token = self.tokens.sign_access_token(&user)?;
        let refresh_token = self.tokens.sign_refresh_token(&user)?;

        track_token_issued(TokenKind::Access.as_str());
        track_token_issued(TokenKind::Refresh.as_str());

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(AppError::internal)?;
        authorization.set_sensitive(true);

        let refresh_cookie = Cookie::build((REFRESH_TOKEN_COOKIE, refresh_token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookie)
            .path("/")
            .build();

        Ok(Issued {
            user,
            effects: SessionEffects {
                authorization,
                refresh_cookie,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum_extra::extract::cookie::Key;
    use chrono::Utc;
    use tokengate_config::{Environment, JwtConfig};
    use uuid::Uuid;

    fn cookie_secret() -> String {
        "k".repeat(64)
    }

    fn issuer(environment: Environment) -> (TokenIssuer, TokenService) {
        let tokens = TokenService::new(&JwtConfig::new("access-secret", "refresh-secret").unwrap());
        let cookie = CookieConfig::new(cookie_secret(), environment).unwrap();
        (TokenIssuer::new(tokens.clone(), &cookie), tokens)
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "session@example.com".to_string(),
            name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_returns_user_unchanged() {
        let (issuer, _) = issuer(Environment::Development);
        let user = user();

        let issued = issuer.issue(user.clone()).unwrap();
        assert_eq!(issued.user, user);
    }

    #[test]
    fn test_authorization_header_carries_access_token() {
        let (issuer, tokens) = issuer(Environment::Development);
        let user = user();

        let issued = issuer.issue(user.clone()).unwrap();
        let value = issued.effects.authorization.to_str().unwrap();
        let token = value.strip_prefix("Bearer ").unwrap();

        let claims = tokens.verify_access_token(token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert!(issued.effects.authorization.is_sensitive());
    }

    #[test]
    fn test_refresh_cookie_attributes() {
        let (issuer, tokens) = issuer(Environment::Development);
        let user = user();

        let cookie = issuer.issue(user.clone()).unwrap().effects.refresh_cookie;
        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.path(), Some("/"));

        let claims = tokens.verify_refresh_token(cookie.value()).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
    }

    #[test]
    fn test_refresh_cookie_secure_in_production() {
        let (issuer, _) = issuer(Environment::Production);

        let cookie = issuer.issue(user()).unwrap().effects.refresh_cookie;
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_apply_signs_cookie_into_jar() {
        let (issuer, tokens) = issuer(Environment::Development);
        let key = Key::from(cookie_secret().as_bytes());
        let user = user();

        let effects = issuer.issue(user.clone()).unwrap().effects;
        let (jar, [(name, value)]) = effects.apply(SignedCookieJar::new(key.clone()));
        assert_eq!(name, header::AUTHORIZATION);
        assert!(value.to_str().unwrap().starts_with("Bearer "));

        // The jar returns the verified plaintext value
        let cookie = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
        assert!(tokens.verify_refresh_token(cookie.value()).is_ok());

        // An unsigned value under the same name is rejected
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{REFRESH_TOKEN_COOKIE}={}", cookie.value())
                .parse()
                .unwrap(),
        );
        let other = SignedCookieJar::from_headers(&headers, key);
        assert!(other.get(REFRESH_TOKEN_COOKIE).is_none());
    }
}
