use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Response body for a successful delete
#[derive(Serialize, ToSchema)]
pub struct DeleteProductResponse {
    pub success: bool,
}

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        count_products,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductFilter, DeleteProductResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Print product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/count", get(count_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with pagination and an optional tag filter
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Page of products in id-ascending order", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created and persisted", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product (partial merge of the supplied fields)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<DeleteProductResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteProductResponse { success: true }))
}

/// Count products matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Product count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<u64>> {
    let count = service.count_products(filter).await?;
    Ok(Json(count))
}
