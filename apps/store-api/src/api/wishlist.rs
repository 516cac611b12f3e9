use axum::Router;
use domain_products::{MongoProductRepository, ProductService};
use domain_wishlist::{CatalogStock, MongoWishlistRepository, WishlistService, handlers};
use std::sync::Arc;

use super::authenticated;
use crate::state::AppState;

pub fn router(state: &AppState, products: &ProductService<MongoProductRepository>) -> Router {
    let stock = Arc::new(CatalogStock::new(products.repository()));
    let service = WishlistService::new(MongoWishlistRepository::new(&state.db), stock);

    Router::new().nest("/wishlist", authenticated(state, handlers::router(service)))
}

/// Unique (user_id, product_id) index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoWishlistRepository::new(&state.db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create wishlist indexes: {}", e))
}
