//! Orders Domain
//!
//! Checkout, owner-scoped order history and admin status changes. Orders store
//! only product references and quantities; [`pricing`] resolves current
//! catalog prices every time an order is read.
//!
//! ```text
//! Handlers ─► OrderService ─► OrderRepository (MongoDB)
//!                  │
//!                  └─► pricing ─► ProductPrices (products domain)
//! ```

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod pricing;
pub mod repository;
pub mod service;

pub use catalog::{CatalogPrices, ProductPrices};
pub use error::{OrderError, OrderResult};
pub use handlers::{AdminApiDoc, ApiDoc};
pub use models::{
    CreateOrder, CreateOrderItem, FindOrder, Order, OrderFilter, OrderItem, OrderList,
    OrderStatus, PricedItem, PricedOrder, UpdateOrderStatus,
};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use axum_helpers::{Clock, system_clock};
pub use service::OrderService;
