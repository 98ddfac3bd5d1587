//! MongoDB implementation of OrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use domain_products::Product;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, PopulatedOrder, UpdateOrder};
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository.
///
/// Holds a handle to the products collection as well, for resolving order
/// references at read time.
pub struct MongoOrderRepository {
    orders: Collection<Order>,
    products: Collection<Product>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository over the `orders` and `products`
    /// collections
    pub fn new(db: &Database) -> Self {
        Self {
            orders: db.collection::<Order>("orders"),
            products: db.collection::<Product>("products"),
        }
    }

    /// Create a repository with custom collection names
    pub fn with_collections(db: &Database, orders_name: &str, products_name: &str) -> Self {
        Self {
            orders: db.collection::<Order>(orders_name),
            products: db.collection::<Product>(products_name),
        }
    }

    /// Get the underlying orders collection for advanced operations
    pub fn collection(&self) -> &Collection<Order> {
        &self.orders
    }

    /// Initialize indexes for the lookup fields.
    ///
    /// Both the product-reference list and the status carry an index, since
    /// the list endpoint filters on each.
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "products": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_products".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "status": 1 })
                .options(IndexOptions::builder().name("idx_status".to_string()).build())
                .build(),
        ];

        self.orders.create_indexes(indexes).await?;
        tracing::info!("Order indexes initialized");
        Ok(())
    }

    /// Build a MongoDB filter document from an OrderFilter
    fn build_filter(filter: &OrderFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref product_id) = filter.product_id {
            // Equality against an array field matches membership
            doc.insert("products", to_bson(product_id).unwrap_or(Bson::Null));
        }

        if let Some(ref status) = filter.status {
            doc.insert("status", status.to_string());
        }

        doc
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Resolve product references into full documents.
    ///
    /// Preserves reference order (including duplicates); ids that no longer
    /// exist are dropped silently.
    async fn resolve_products(&self, ids: &[Uuid]) -> OrderResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = to_bson(&ids).unwrap_or(Bson::Null);
        let cursor = self
            .products
            .find(doc! { "_id": { "$in": id_list } })
            .await?;
        let found: Vec<Product> = cursor.try_collect().await?;

        let by_id: HashMap<Uuid, Product> =
            found.into_iter().map(|p| (p.id, p)).collect();

        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn populate(&self, order: Order) -> OrderResult<PopulatedOrder> {
        let products = self.resolve_products(&order.products).await?;
        Ok(order.into_populated(products))
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, input), fields(buyer = %input.buyer_email))]
    async fn create(&self, input: CreateOrder) -> OrderResult<PopulatedOrder> {
        let order = Order::new(input);

        self.orders.insert_one(&order).await?;

        tracing::info!(order_id = %order.id, "Order created successfully");
        self.populate(order).await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<PopulatedOrder>> {
        match self.orders.find_one(Self::id_filter(id)).await? {
            Some(order) => Ok(Some(self.populate(order).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self
            .orders
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateOrder) -> OrderResult<PopulatedOrder> {
        let existing = self
            .orders
            .find_one(Self::id_filter(id))
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let expected_version = existing.version;
        let mut updated = existing;
        updated.apply_update(input);
        updated.version = expected_version + 1;

        // Compare-and-swap: only replace if the version is still what we read
        let mut cas_filter = Self::id_filter(id);
        cas_filter.insert("version", expected_version);

        let result = self.orders.replace_one(cas_filter, &updated).await?;
        if result.matched_count == 0 {
            return Err(OrderError::Conflict(id));
        }

        tracing::info!(order_id = %id, version = updated.version, "Order updated successfully");
        self.populate(updated).await
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: OrderFilter) -> OrderResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.orders.count_documents(mongo_filter).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    #[test]
    fn test_build_filter_empty() {
        let filter = OrderFilter::default();
        let doc = MongoOrderRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_product_id() {
        let filter = OrderFilter {
            product_id: Some(Uuid::now_v7()),
            ..Default::default()
        };
        let doc = MongoOrderRepository::build_filter(&filter);
        assert!(doc.contains_key("products"));
    }

    #[test]
    fn test_build_filter_with_status() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        let doc = MongoOrderRepository::build_filter(&filter);
        assert_eq!(doc.get_str("status").unwrap(), "PENDING");
    }

    #[test]
    fn test_build_filter_combines_both() {
        let filter = OrderFilter {
            product_id: Some(Uuid::now_v7()),
            status: Some(OrderStatus::Completed),
            ..Default::default()
        };
        let doc = MongoOrderRepository::build_filter(&filter);
        assert!(doc.contains_key("products"));
        assert_eq!(doc.get_str("status").unwrap(), "COMPLETED");
    }
}
