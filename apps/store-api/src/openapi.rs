//! OpenAPI documentation configuration

use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Combined OpenAPI documentation for the store
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Peripherals Store API",
        version = "0.1.0",
        description = "Catalog, reviews, orders, wishlist and admin statistics",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    modifiers(&SecurityAddon),
    nest(
        (path = "/api/v1/auth", api = domain_users::ApiDoc),
        (path = "/api/v1/profile", api = domain_users::ProfileApiDoc),
        (path = "/api/v1/categories", api = domain_categories::ApiDoc),
        (path = "/api/v1/products", api = domain_products::ApiDoc),
        (path = "/api/v1/orders", api = domain_orders::ApiDoc),
        (path = "/api/v1/wishlist", api = domain_wishlist::ApiDoc),
        (path = "/api/v1/admin", api = domain_users::AdminApiDoc),
        (path = "/api/v1/admin/categories", api = domain_categories::AdminApiDoc),
        (path = "/api/v1/admin/products", api = domain_products::AdminApiDoc),
        (path = "/api/v1/admin/orders", api = domain_orders::AdminApiDoc),
        (path = "/api/v1/admin/stats", api = domain_statistics::AdminApiDoc)
    )
)]
pub struct ApiDoc;
