//! Product lookups needed by the category delete guard

use async_trait::async_trait;
use domain_products::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::CategoryResult;

/// Number of products that reference a category
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsCounter: Send + Sync {
    async fn count_by_category(&self, category_id: Uuid) -> CategoryResult<u64>;
}

/// [`ProductsCounter`] backed by the products repository
pub struct CatalogProductsCounter<P: ProductRepository> {
    products: Arc<P>,
}

impl<P: ProductRepository> CatalogProductsCounter<P> {
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl<P: ProductRepository + 'static> ProductsCounter for CatalogProductsCounter<P> {
    async fn count_by_category(&self, category_id: Uuid) -> CategoryResult<u64> {
        Ok(self.products.count_by_category(category_id).await?)
    }
}
