//! Stock lookups against the products domain

use async_trait::async_trait;
use domain_products::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WishlistError, WishlistResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStock: Send + Sync {
    /// Units on hand, `None` if the product does not exist
    async fn stock_of(&self, product_id: Uuid) -> WishlistResult<Option<i64>>;
}

pub struct CatalogStock<P: ProductRepository> {
    products: Arc<P>,
}

impl<P: ProductRepository> CatalogStock<P> {
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl<P: ProductRepository + 'static> ProductStock for CatalogStock<P> {
    async fn stock_of(&self, product_id: Uuid) -> WishlistResult<Option<i64>> {
        let product = self
            .products
            .get_by_id(product_id)
            .await
            .map_err(|e| WishlistError::Database(e.to_string()))?;
        Ok(product.map(|p| p.stock))
    }
}
