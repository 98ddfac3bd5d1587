use chrono::{DateTime, Utc};
use domain_products::Product;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been placed
    #[default]
    Created,
    /// Order is awaiting fulfillment
    Pending,
    /// Order has been fulfilled
    Completed,
}

/// Order entity - as stored in MongoDB, products held by reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Buyer contact address
    #[serde(rename = "buyerEmail")]
    pub buyer_email: String,
    /// Referenced product ids, in the order the buyer picked them
    #[serde(default)]
    pub products: Vec<Uuid>,
    /// Fulfillment status
    #[serde(default)]
    pub status: OrderStatus,
    /// Compare-and-swap token, bumped on every successful edit
    #[serde(default)]
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// An order with its product references resolved into full documents.
///
/// Dangling references (products deleted since the order was placed) are
/// dropped during resolution, so `products` can be shorter than the stored
/// reference list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulatedOrder {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "buyerEmail")]
    pub buyer_email: String,
    /// Resolved product documents, in reference order
    pub products: Vec<Product>,
    pub status: OrderStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[serde(rename = "buyerEmail")]
    #[validate(email)]
    pub buyer_email: String,
    /// Product ids; an empty list is a valid (if empty-handed) order
    #[serde(default)]
    pub products: Vec<Uuid>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// DTO for partially updating an existing order
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    #[serde(rename = "buyerEmail")]
    #[validate(email)]
    pub buyer_email: Option<String>,
    pub products: Option<Vec<Uuid>>,
    pub status: Option<OrderStatus>,
}

/// Query filters for listing orders
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct OrderFilter {
    /// Only orders referencing this product id
    #[serde(rename = "productId")]
    pub product_id: Option<Uuid>,
    /// Only orders with this status
    pub status: Option<OrderStatus>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            product_id: None,
            status: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> i64 {
    25
}

impl Order {
    /// Create a new order from a CreateOrder DTO
    pub fn new(input: CreateOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            buyer_email: input.buyer_email,
            products: input.products,
            status: input.status,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateOrder DTO.
    ///
    /// Shallow merge: provided keys overwrite, the rest stay. The version
    /// bump happens at the repository, next to the compare-and-swap write.
    pub fn apply_update(&mut self, update: UpdateOrder) {
        if let Some(buyer_email) = update.buyer_email {
            self.buyer_email = buyer_email;
        }
        if let Some(products) = update.products {
            self.products = products;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    /// Attach resolved product documents to this order
    pub fn into_populated(self, products: Vec<Product>) -> PopulatedOrder {
        PopulatedOrder {
            id: self.id,
            buyer_email: self.buyer_email,
            products,
            status: self.status,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
