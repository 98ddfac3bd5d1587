//! API routes module
//!
//! Wires the domain routers and health endpoints into one router.

pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
        .merge(health::router(state.clone()))
}
