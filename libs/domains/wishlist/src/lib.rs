//! Wishlist Domain
//!
//! Per-user saved products. Only existing, in-stock products can be added, and a
//! unique index on `(user_id, product_id)` keeps one entry per product.

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use catalog::{CatalogStock, ProductStock};
pub use error::{WishlistError, WishlistResult};
pub use handlers::ApiDoc;
pub use models::{AddWishlistItem, WishlistFilter, WishlistItem, WishlistList};
pub use mongodb::MongoWishlistRepository;
pub use repository::WishlistRepository;
pub use service::WishlistService;
