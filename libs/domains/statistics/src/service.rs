use std::sync::Arc;
use tracing::instrument;

use crate::error::StatisticsResult;
use crate::kpi;
use crate::models::{ProductStatistics, SalesStatistics, StatsQuery};
use crate::repository::StatisticsRepository;
use crate::window::TimeWindow;

/// Admin reporting over orders, products and categories
pub struct StatisticsService<R: StatisticsRepository> {
    repository: Arc<R>,
}

impl<R: StatisticsRepository> StatisticsService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn sales_statistics(&self, query: &StatsQuery) -> StatisticsResult<SalesStatistics> {
        let window = TimeWindow::resolve(query)?;
        let facets = self.repository.sales_facets(window).await?;
        Ok(kpi::sales_statistics(&facets))
    }

    /// `total_categories` ignores the window
    #[instrument(skip(self))]
    pub async fn product_statistics(
        &self,
        query: &StatsQuery,
    ) -> StatisticsResult<ProductStatistics> {
        let window = TimeWindow::resolve(query)?;
        let facets = self.repository.product_facets(window).await?;
        let categories = self.repository.count_categories().await?;
        Ok(kpi::product_statistics(&facets, categories))
    }
}

impl<R: StatisticsRepository> Clone for StatisticsService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
