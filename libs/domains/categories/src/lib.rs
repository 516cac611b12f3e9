//! Categories Domain
//!
//! Product categories. A category cannot be deleted while products reference it;
//! the count comes from the products domain through [`ProductsCounter`].
//!
//! ```rust,no_run
//! use domain_categories::{CatalogProductsCounter, CategoryService, MongoCategoryRepository};
//! use domain_products::MongoProductRepository;
//! use std::sync::Arc;
//!
//! # async fn example(db: mongodb::Database) {
//! let products = Arc::new(MongoProductRepository::new(&db));
//! let service = CategoryService::new(
//!     MongoCategoryRepository::new(&db),
//!     Arc::new(CatalogProductsCounter::new(products)),
//! );
//! let router = domain_categories::handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod products;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::{AdminApiDoc, ApiDoc};
pub use models::{Category, CreateCategory, UpdateCategory};
pub use mongodb::MongoCategoryRepository;
pub use products::{CatalogProductsCounter, ProductsCounter};
pub use repository::CategoryRepository;
pub use service::CategoryService;
