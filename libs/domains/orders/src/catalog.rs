//! Current product prices, read from the products domain

use async_trait::async_trait;
use domain_products::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductPrices: Send + Sync {
    /// `None` if the product does not exist
    async fn price_of(&self, product_id: Uuid) -> OrderResult<Option<f64>>;
}

/// [`ProductPrices`] backed by the products repository
pub struct CatalogPrices<P: ProductRepository> {
    products: Arc<P>,
}

impl<P: ProductRepository> CatalogPrices<P> {
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl<P: ProductRepository + 'static> ProductPrices for CatalogPrices<P> {
    async fn price_of(&self, product_id: Uuid) -> OrderResult<Option<f64>> {
        let product = self
            .products
            .get_by_id(product_id)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?;
        Ok(product.map(|p| p.price))
    }
}
