use axum::Router;
use domain_orders::{CatalogPrices, MongoOrderRepository, OrderService, handlers, system_clock};
use domain_products::{MongoProductRepository, ProductService};
use std::sync::Arc;

use super::{admin_only, authenticated};
use crate::state::AppState;

/// Orders are priced from the live catalog whenever they are read
pub fn router(state: &AppState, products: &ProductService<MongoProductRepository>) -> Router {
    let prices = Arc::new(CatalogPrices::new(products.repository()));
    let service = OrderService::new(MongoOrderRepository::new(&state.db), prices, system_clock());

    Router::new()
        .nest("/orders", authenticated(state, handlers::router(service.clone())))
        .nest(
            "/admin/orders",
            admin_only(state, handlers::admin_router(service)),
        )
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoOrderRepository::new(&state.db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create order indexes: {}", e))
}
