//! Order Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, PopulatedOrder, UpdateOrder};
use crate::repository::OrderRepository;

/// Order service providing business logic operations
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    /// Create a new OrderService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new order.
    ///
    /// Referenced product ids are not checked for existence here; a
    /// reference that never resolves is the buyer's loss at read time.
    #[instrument(skip(self, input), fields(buyer = %input.buyer_email))]
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<PopulatedOrder> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get an order by ID, with product references resolved
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> OrderResult<PopulatedOrder> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// List orders with pagination and the optional filters
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        self.repository.list(filter).await
    }

    /// Update an existing order
    #[instrument(skip(self, input))]
    pub async fn update_order(&self, id: Uuid, input: UpdateOrder) -> OrderResult<PopulatedOrder> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Count orders matching a filter
    #[instrument(skip(self))]
    pub async fn count_orders(&self, filter: OrderFilter) -> OrderResult<u64> {
        self.repository.count(filter).await
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use crate::repository::MockOrderRepository;
    use mockall::predicate::eq;

    fn valid_input(products: Vec<Uuid>) -> CreateOrder {
        CreateOrder {
            buyer_email: "a@example.com".to_string(),
            products,
            status: OrderStatus::default(),
        }
    }

    #[tokio::test]
    async fn test_create_order_passes_through_valid_input() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(Order::new(input).into_populated(vec![])));

        let service = OrderService::new(repo);
        let created = service
            .create_order(valid_input(vec![Uuid::now_v7()]))
            .await
            .unwrap();

        assert_eq!(created.buyer_email, "a@example.com");
        assert_eq!(created.status, OrderStatus::Created);
    }

    #[tokio::test]
    async fn test_create_order_with_empty_products_succeeds() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(Order::new(input).into_populated(vec![])));

        let service = OrderService::new(repo);
        let created = service.create_order(valid_input(vec![])).await.unwrap();
        assert!(created.products.is_empty());
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_email_before_store() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().times(0);

        let service = OrderService::new(repo);
        let result = service
            .create_order(CreateOrder {
                buyer_email: "nope".to_string(),
                products: vec![],
                status: OrderStatus::default(),
            })
            .await;

        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_order_absent_is_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockOrderRepository::new();
        repo.expect_get_by_id().with(eq(id)).returning(|_| Ok(None));

        let service = OrderService::new(repo);
        let result = service.get_order(id).await;
        assert!(matches!(result, Err(OrderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_order_merges_status() {
        let id = Uuid::now_v7();
        let mut repo = MockOrderRepository::new();
        repo.expect_update()
            .times(1)
            .returning(move |_, change| {
                let mut order = Order::new(CreateOrder {
                    buyer_email: "a@example.com".to_string(),
                    products: vec![],
                    status: OrderStatus::default(),
                });
                order.apply_update(change);
                Ok(order.into_populated(vec![]))
            });

        let service = OrderService::new(repo);
        let updated = service
            .update_order(
                id,
                UpdateOrder {
                    status: Some(OrderStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_list_orders_passes_filter_through() {
        let product_id = Uuid::now_v7();
        let mut repo = MockOrderRepository::new();
        repo.expect_list()
            .withf(move |filter| {
                filter.product_id == Some(product_id)
                    && filter.status == Some(OrderStatus::Pending)
            })
            .returning(|_| Ok(vec![]));

        let service = OrderService::new(repo);
        let filter = OrderFilter {
            product_id: Some(product_id),
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        assert!(service.list_orders(filter).await.unwrap().is_empty());
    }
}
