//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Printshop API",
        version = "0.1.0",
        description = "MongoDB-backed storefront API for print products and orders",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/orders", api = domain_orders::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Print product management endpoints"),
        (name = "Orders", description = "Order management endpoints")
    )
)]
pub struct ApiDoc;
