//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository over the `products` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("printshop");
    /// let repo = MongoProductRepository::new(&db);
    /// ```
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a repository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from a ProductFilter
    fn build_filter(filter: &ProductFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref tag) = filter.tag {
            doc.insert("tags", doc! { "$elemMatch": { "title": tag } });
        }

        doc
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        // Identifier-ascending keeps pages stable: v7 ids sort by insertion
        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let existing = self
            .collection
            .find_one(Self::id_filter(id))
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let expected_version = existing.version;
        let mut updated = existing;
        updated.apply_update(input);
        updated.version = expected_version + 1;

        // Compare-and-swap: the replace only matches if nobody else bumped
        // the version since our read
        let mut cas_filter = Self::id_filter(id);
        cas_filter.insert("version", expected_version);

        let result = self.collection.replace_one(cas_filter, &updated).await?;
        if result.matched_count == 0 {
            return Err(ProductError::Conflict(id));
        }

        tracing::info!(product_id = %id, version = updated.version, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }
}
