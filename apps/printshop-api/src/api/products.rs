//! Products API routes
//!
//! Wires the products domain to HTTP routes.

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoProductRepository::new(&state.db);

    // Create the service
    let service = ProductService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
