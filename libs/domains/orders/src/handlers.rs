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
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderFilter, PopulatedOrder, UpdateOrder};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, count_orders),
    components(
        schemas(Order, PopulatedOrder, CreateOrder, UpdateOrder, OrderFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the orders router with all HTTP endpoints
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/count", get(count_orders))
        .route("/{id}", get(get_order).put(update_order))
        .with_state(shared_service)
}

/// List orders with pagination and optional product/status filters.
///
/// Product references stay unresolved here; fetch a single order for the
/// resolved form.
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Page of orders in id-ascending order", body = Vec<Order>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<Json<Vec<Order>>> {
    let orders = service.list_orders(filter).await?;
    Ok(Json(orders))
}

/// Create a new order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Order created, product references resolved", body = PopulatedOrder),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<Json<PopulatedOrder>> {
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

/// Get an order by ID, with product references resolved
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = PopulatedOrder),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<PopulatedOrder>> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

/// Update an order (partial merge of the supplied fields)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = PopulatedOrder),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<PopulatedOrder>> {
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Count orders matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Order count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<Json<u64>> {
    let count = service.count_orders(filter).await?;
    Ok(Json(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use crate::repository::MockOrderRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_products::{
        CreateProduct, Product, ProductLinks, ProductTag, ProductUrls, ProductUser,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(repo: MockOrderRepository) -> Router {
        router(OrderService::new(repo))
    }

    fn sample_product() -> Product {
        Product::new(CreateProduct {
            description: Some("Dunes at dusk".to_string()),
            alt_description: None,
            likes: 12,
            urls: ProductUrls {
                regular: "https://images.example.com/dunes-regular.jpg".to_string(),
                small: "https://images.example.com/dunes-small.jpg".to_string(),
                thumb: "https://images.example.com/dunes-thumb.jpg".to_string(),
            },
            links: ProductLinks {
                self_link: "https://api.example.com/photos/dunes".to_string(),
                html: "https://example.com/photos/dunes".to_string(),
            },
            user: ProductUser {
                id: "u-100".to_string(),
                first_name: "Alex".to_string(),
                last_name: None,
                portfolio_url: None,
                username: "alexshoots".to_string(),
            },
            tags: vec![ProductTag {
                title: "texture".to_string(),
            }],
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_resolved_products() {
        let product = sample_product();
        let product_id = product.id;

        let mut repo = MockOrderRepository::new();
        repo.expect_create().times(1).returning(move |input| {
            let resolved = vec![product.clone()];
            Ok(Order::new(input).into_populated(resolved))
        });

        let payload = serde_json::json!({
            "buyerEmail": "a@example.com",
            "products": [product_id]
        });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["buyerEmail"], "a@example.com");
        assert_eq!(body["status"], "CREATED");
        // The resolved product is the full document, not just the id
        assert_eq!(body["products"][0]["_id"], product_id.to_string());
        assert_eq!(body["products"][0]["likes"], 12);
    }

    #[tokio::test]
    async fn test_create_order_invalid_email_is_rejected() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().times(0);

        let payload = serde_json::json!({
            "buyerEmail": "not-an-email",
            "products": []
        });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_orders_parses_camel_case_query() {
        let product_id = Uuid::now_v7();

        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .withf(move |filter| {
                filter.product_id == Some(product_id)
                    && filter.status == Some(OrderStatus::Pending)
                    && filter.offset == 2
                    && filter.limit == 5
            })
            .returning(|_| Ok(vec![]));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/?offset=2&limit=5&productId={}&status=PENDING",
                        product_id
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_order_absent_yields_structured_404() {
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_order_status_change() {
        let mut repo = MockOrderRepository::new();
        repo.expect_update().times(1).returning(|_, change| {
            let mut order = Order::new(CreateOrder {
                buyer_email: "a@example.com".to_string(),
                products: vec![],
                status: OrderStatus::default(),
            });
            order.apply_update(change);
            order.version += 1;
            Ok(order.into_populated(vec![]))
        });

        let payload = serde_json::json!({ "status": "COMPLETED" });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/{}", Uuid::now_v7()))
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "COMPLETED");
        assert_eq!(body["version"], 1);
    }

    #[tokio::test]
    async fn test_update_order_unknown_status_is_rejected() {
        let mut repo = MockOrderRepository::new();
        repo.expect_update().times(0);

        let payload = serde_json::json!({ "status": "SHIPPED" });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/{}", Uuid::now_v7()))
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
