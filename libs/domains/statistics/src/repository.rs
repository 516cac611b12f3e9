use async_trait::async_trait;

use crate::error::StatisticsResult;
use crate::models::{ProductFacets, SalesFacets};
use crate::window::TimeWindow;

/// Raw aggregation sums; KPIs are derived in the service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Per-status counts plus revenue of orders created inside `window`.
    /// Revenue uses current product prices; missing products contribute 0.
    async fn sales_facets(&self, window: TimeWindow) -> StatisticsResult<SalesFacets>;

    /// Stock and review sums of products created inside `window`
    async fn product_facets(&self, window: TimeWindow) -> StatisticsResult<ProductFacets>;

    /// All categories, regardless of any window
    async fn count_categories(&self) -> StatisticsResult<u64>;
}
