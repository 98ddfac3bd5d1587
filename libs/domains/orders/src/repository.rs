use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderFilter, PopulatedOrder, UpdateOrder};

/// Repository trait for Order persistence
///
/// Reads that return a single order resolve its product references; the
/// paged list stays by-reference, matching what the storefront needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create a new order and return it with product references resolved
    async fn create(&self, input: CreateOrder) -> OrderResult<PopulatedOrder>;

    /// Get an order by ID with product references resolved.
    /// Absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<PopulatedOrder>>;

    /// List orders sorted by identifier ascending, honoring offset/limit
    /// and the product-membership/status filters
    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<Order>>;

    /// Update an existing order via compare-and-swap on its version,
    /// returning the resolved result
    async fn update(&self, id: Uuid, input: UpdateOrder) -> OrderResult<PopulatedOrder>;

    /// Count orders matching a filter
    async fn count(&self, filter: OrderFilter) -> OrderResult<u64>;
}
