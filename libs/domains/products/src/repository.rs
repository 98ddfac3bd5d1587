use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// Defines the data access interface for products. Implementations can use
/// different storage backends (MongoDB in production, a mock in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID. Absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products sorted by identifier ascending, honoring offset/limit
    /// and the tag filter
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Update an existing product via compare-and-swap on its version
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, returning the deleted-document count (0 or 1)
    async fn delete(&self, id: Uuid) -> ProductResult<u64>;

    /// Count products matching a filter
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;
}
