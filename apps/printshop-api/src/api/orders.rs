//! Orders API routes
//!
//! Wires the orders domain to HTTP routes.

use axum::Router;
use domain_orders::{MongoOrderRepository, OrderService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create the orders router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoOrderRepository::new(&state.db);

    // Create the service
    let service = OrderService::new(repository);

    // Return the domain's router
    handlers::router(service)
}

/// Initialize the order lookup indexes at startup
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoOrderRepository::new(db).init_indexes().await?;
    Ok(())
}
