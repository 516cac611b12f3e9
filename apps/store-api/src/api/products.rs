use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use super::{admin_only, authenticated};
use crate::state::AppState;

/// The product service is shared: categories, orders and wishlist read the
/// catalog through its repository.
pub fn service(state: &AppState) -> ProductService<MongoProductRepository> {
    ProductService::new(MongoProductRepository::new(&state.db))
}

pub fn router(state: &AppState, service: ProductService<MongoProductRepository>) -> Router {
    let reviews = authenticated(state, handlers::reviews_router(service.clone()));

    Router::new()
        .nest("/products", handlers::router(service.clone()).merge(reviews))
        .nest(
            "/admin/products",
            admin_only(state, handlers::admin_router(service)),
        )
}

/// Category index for listing and the category delete guard
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))
}
