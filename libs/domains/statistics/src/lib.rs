//! Statistics Domain
//!
//! Admin KPIs over orders, products and categories. A query selects a time
//! window (a calendar year, a range of whole days, or everything) that filters
//! orders and products by creation time; the category count is global.
//!
//! Revenue is computed from current product prices, matching how orders are
//! priced when read.

pub mod error;
pub mod handlers;
pub mod kpi;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod window;

pub use error::{StatisticsError, StatisticsResult};
pub use handlers::AdminApiDoc;
pub use models::{
    ProductFacets, ProductStatistics, SalesFacets, SalesStatistics, StatsQuery, StatusCount,
};
pub use mongodb::MongoStatisticsRepository;
pub use repository::StatisticsRepository;
pub use service::StatisticsService;
pub use window::TimeWindow;
