use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Image renditions for a product, keyed by size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductUrls {
    /// Full-size rendition
    #[validate(url)]
    pub regular: String,
    /// Gallery-size rendition
    #[validate(url)]
    pub small: String,
    /// Thumbnail rendition
    #[validate(url)]
    pub thumb: String,
}

/// Canonical locations of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductLinks {
    /// API location of this product
    #[serde(rename = "self")]
    #[validate(url)]
    pub self_link: String,
    /// Human-facing page for this product
    #[validate(url)]
    pub html: String,
}

/// The artist who published the print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductUser {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[validate(url)]
    pub portfolio_url: Option<String>,
    #[validate(length(min = 1))]
    pub username: String,
}

/// A single tag attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductTag {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
}

/// Product entity - a print stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB). UUID v7, so
    /// identifier-ascending order is insertion order.
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Caption for the print
    pub description: Option<String>,
    /// Accessibility text
    pub alt_description: Option<String>,
    /// Like count carried over from the source gallery
    pub likes: i64,
    /// Image renditions
    pub urls: ProductUrls,
    /// Canonical locations
    pub links: ProductLinks,
    /// Publishing artist
    pub user: ProductUser,
    /// Ordered tags used by the storefront filter
    #[serde(default)]
    pub tags: Vec<ProductTag>,
    /// Compare-and-swap token, bumped on every successful edit
    #[serde(default)]
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    pub description: Option<String>,
    pub alt_description: Option<String>,
    #[validate(range(min = 0))]
    pub likes: i64,
    #[validate(nested)]
    pub urls: ProductUrls,
    #[validate(nested)]
    pub links: ProductLinks,
    #[validate(nested)]
    pub user: ProductUser,
    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<ProductTag>,
}

/// DTO for partially updating an existing product.
///
/// Only the provided keys are merged onto the stored document; nested sets
/// (`urls`, `links`, `user`) are replaced wholesale when present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub description: Option<String>,
    pub alt_description: Option<String>,
    #[validate(range(min = 0))]
    pub likes: Option<i64>,
    #[validate(nested)]
    pub urls: Option<ProductUrls>,
    #[validate(nested)]
    pub links: Option<ProductLinks>,
    #[validate(nested)]
    pub user: Option<ProductUser>,
    #[validate(nested)]
    pub tags: Option<Vec<ProductTag>>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Only products carrying a tag with this title
    pub tag: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            tag: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> i64 {
    25
}

impl Product {
    /// Create a new product from a CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            description: input.description,
            alt_description: input.alt_description,
            likes: input.likes,
            urls: input.urls,
            links: input.links,
            user: input.user,
            tags: input.tags,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateProduct DTO.
    ///
    /// Shallow merge: each provided key overwrites the stored value, keys
    /// left out are untouched. The version bump happens at the repository,
    /// next to the compare-and-swap write.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(alt_description) = update.alt_description {
            self.alt_description = Some(alt_description);
        }
        if let Some(likes) = update.likes {
            self.likes = likes;
        }
        if let Some(urls) = update.urls {
            self.urls = urls;
        }
        if let Some(links) = update.links {
            self.links = links;
        }
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    /// A fully-populated create payload, valid against every field rule
    pub fn create_product_fixture() -> CreateProduct {
        CreateProduct {
            description: Some("Dunes at dusk".to_string()),
            alt_description: Some("rolling sand dunes under a violet sky".to_string()),
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
        }
    }
}
