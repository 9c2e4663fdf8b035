//! OpenAPI document assembly.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api::models;

/// Registers the two ways a session token reaches the API: the
/// `Authorization: Bearer` header and the session cookie.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "CookieAuth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "invctl",
        description = "Inventory control panel API: session-authenticated access to arrival groups, products, and staff accounts."
    ),
    paths(
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::logout,
        crate::api::handlers::groups::list_groups,
        crate::api::handlers::groups::delete_group,
        crate::api::handlers::products::list_products,
        crate::api::handlers::products::inventory,
        crate::api::handlers::products::delete_product,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::profile::get_profile,
        crate::api::handlers::profile::update_profile,
        crate::api::handlers::dashboard::get_dashboard,
    ),
    components(schemas(
        models::MessageResponse,
        models::auth::LoginRequest,
        models::auth::LoginBody,
        models::dashboard::DashboardResponse,
        models::groups::GroupResponse,
        models::groups::RelatedProductResponse,
        models::products::ProductResponse,
        models::products::InventoryItemResponse,
        models::products::InventoryResponse,
        models::users::CurrentUser,
        models::users::ProfileResponse,
        models::users::ProfileUpdateRequest,
        models::users::UserResponse,
        models::products::ProductStatus,
    )),
    tags(
        (name = "auth", description = "Login and logout"),
        (name = "groups", description = "Arrival group management"),
        (name = "products", description = "Product and inventory management"),
        (name = "users", description = "Staff account management"),
        (name = "profile", description = "The caller's own account"),
        (name = "dashboard", description = "Overview counts"),
    )
)]
pub struct ApiDoc;
