use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tokengate_models::{
    AccessTokenResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, SignUp, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::me,
    ),
    components(
        schemas(
            User,
            SignUp,
            LoginRequest,
            RefreshTokenRequest,
            AccessTokenResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token endpoints")
    ),
    info(
        title = "Tokengate API",
        version = "0.1.0",
        description = "Session and token issuance: registration, password login, JWT access/refresh tokens and a signed refresh cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
