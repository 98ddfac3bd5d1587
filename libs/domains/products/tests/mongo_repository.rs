//! Integration tests for the MongoDB product repository.
//!
//! These run against a real MongoDB instance and are ignored by default:
//!
//! ```sh
//! MONGODB_URL=mongodb://localhost:27017 cargo test -p domain_products -- --ignored
//! ```

use domain_products::{
    CreateProduct, MongoProductRepository, ProductFilter, ProductLinks, ProductRepository,
    ProductTag, ProductUrls, ProductUser, UpdateProduct,
};
use mongodb::Client;
use uuid::Uuid;

async fn test_repository(collection: &str) -> MongoProductRepository {
    let url =
        std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = Client::with_uri_str(&url).await.expect("mongo connection");
    let db = client.database("printshop_test");
    db.collection::<mongodb::bson::Document>(collection)
        .drop()
        .await
        .ok();
    MongoProductRepository::with_collection(&db, collection)
}

fn create_input(description: &str, tag: &str) -> CreateProduct {
    CreateProduct {
        description: Some(description.to_string()),
        alt_description: None,
        likes: 3,
        urls: ProductUrls {
            regular: "https://images.example.com/p-regular.jpg".to_string(),
            small: "https://images.example.com/p-small.jpg".to_string(),
            thumb: "https://images.example.com/p-thumb.jpg".to_string(),
        },
        links: ProductLinks {
            self_link: "https://api.example.com/photos/p".to_string(),
            html: "https://example.com/photos/p".to_string(),
        },
        user: ProductUser {
            id: "u-1".to_string(),
            first_name: "Robin".to_string(),
            last_name: Some("Mori".to_string()),
            portfolio_url: None,
            username: "robinm".to_string(),
        },
        tags: vec![ProductTag {
            title: tag.to_string(),
        }],
    }
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn create_then_get_roundtrips_required_fields() {
    let repo = test_repository("products_it_roundtrip").await;

    let input = create_input("Product 1", "texture");
    let created = repo.create(input.clone()).await.unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.likes, input.likes);
    assert_eq!(fetched.urls, input.urls);
    assert_eq!(fetched.links, input.links);
    assert_eq!(fetched.user, input.user);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn list_returns_insertion_order_and_honors_paging() {
    let repo = test_repository("products_it_paging").await;

    let first = repo.create(create_input("Product 1", "texture")).await.unwrap();
    let second = repo.create(create_input("Product 2", "texture")).await.unwrap();
    let third = repo.create(create_input("Product 3", "gradient")).await.unwrap();

    // Default paging returns everything in id (insertion) order
    let all = repo.list(ProductFilter::default()).await.unwrap();
    assert_eq!(
        all.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![first.id, second.id, third.id]
    );

    // limit caps the page, offset skips exactly that many
    let page = repo
        .list(ProductFilter {
            limit: 1,
            offset: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn list_filters_by_tag_title_membership() {
    let repo = test_repository("products_it_tags").await;

    repo.create(create_input("Product 1", "texture")).await.unwrap();
    let gradient = repo.create(create_input("Product 2", "gradient")).await.unwrap();

    let filtered = repo
        .list(ProductFilter {
            tag: Some("gradient".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, gradient.id);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn update_merges_change_and_bumps_version() {
    let repo = test_repository("products_it_update").await;

    let created = repo.create(create_input("Product 1", "texture")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                description: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("Renamed"));
    assert_eq!(updated.version, created.version + 1);
    // Untouched keys survive
    assert_eq!(updated.user, created.user);

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.description.as_deref(), Some("Renamed"));
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn update_missing_product_is_not_found() {
    let repo = test_repository("products_it_update_missing").await;

    let result = repo.update(Uuid::now_v7(), UpdateProduct::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn delete_reports_count_and_get_is_absent_after() {
    let repo = test_repository("products_it_delete").await;

    let created = repo.create(create_input("Product 1", "texture")).await.unwrap();

    assert_eq!(repo.delete(created.id).await.unwrap(), 1);
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());

    // Deleting a nonexistent id reports zero deletions
    assert_eq!(repo.delete(created.id).await.unwrap(), 0);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn count_matches_filter() {
    let repo = test_repository("products_it_count").await;

    repo.create(create_input("Product 1", "texture")).await.unwrap();
    repo.create(create_input("Product 2", "texture")).await.unwrap();
    repo.create(create_input("Product 3", "gradient")).await.unwrap();

    let all = repo.count(ProductFilter::default()).await.unwrap();
    assert_eq!(all, 3);

    let textured = repo
        .count(ProductFilter {
            tag: Some("texture".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(textured, 2);
}
