//! Orders Domain
//!
//! Domain implementation for managing orders backed by MongoDB. Orders hold
//! references to products by id; reads resolve those references into full
//! product documents (the references are advisory — a dangling id simply
//! resolves to nothing).
//!
//! Layered the same way as the products domain: handlers → service →
//! repository trait → MongoDB implementation → models.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_orders::{
//!     handlers,
//!     mongodb::MongoOrderRepository,
//!     service::OrderService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("printshop");
//!
//! let repository = MongoOrderRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = OrderService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CreateOrder, Order, OrderFilter, OrderStatus, PopulatedOrder, UpdateOrder};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
