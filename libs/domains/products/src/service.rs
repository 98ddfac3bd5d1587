//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation and orchestrates repository
/// operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products with pagination and the optional tag filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product.
    ///
    /// The repository reports how many documents went away; zero means the
    /// id never existed, which surfaces as not-found here.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;
        if deleted == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Count products matching a filter
    #[instrument(skip(self))]
    pub async fn count_products(&self, filter: ProductFilter) -> ProductResult<u64> {
        self.repository.count(filter).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
