use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Sales KPIs over the orders created inside a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesStatistics {
    /// Always the sum of the per-status counts
    pub total_orders: i64,
    /// Quantities times current product prices
    pub total_revenue: f64,
    /// 0 when there are no orders
    pub average_order: f64,
    pub pending_orders: i64,
    pub shipped_orders: i64,
    pub delivered_orders: i64,
    pub cancelled_orders: i64,
}

/// Catalog KPIs over the products created inside a window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductStatistics {
    pub total_products: i64,
    pub total_stock: i64,
    /// Products with stock <= 0
    pub out_of_stock: i64,
    pub total_reviews: i64,
    /// 0 when there are no reviews
    pub average_rating: f64,
    /// Never windowed
    pub total_categories: i64,
}

/// Statistics query string.
///
/// `year` wins over `start`/`end`; a range needs both ends.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
pub struct StatsQuery {
    /// Calendar year, 1900-2100
    pub year: Option<i32>,
    /// First day, `YYYY-MM-DD`
    pub start: Option<String>,
    /// Last day (inclusive), `YYYY-MM-DD`
    pub end: Option<String>,
}

/// Orders per status value, as grouped by the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusCount {
    #[serde(rename = "_id")]
    pub status: String,
    pub count: i64,
}

/// Raw sums of the sales aggregation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SalesFacets {
    #[serde(default)]
    pub status_counts: Vec<StatusCount>,
    /// Distinct orders that have at least one item
    #[serde(default)]
    pub distinct_orders: i64,
    #[serde(default)]
    pub revenue: f64,
}

/// Raw sums of the product aggregation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductFacets {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub total_stock: i64,
    #[serde(default)]
    pub out_of_stock: i64,
    #[serde(default)]
    pub total_reviews: i64,
    #[serde(default)]
    pub rating_sum: i64,
}
