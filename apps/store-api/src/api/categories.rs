use axum::Router;
use domain_categories::{CatalogProductsCounter, CategoryService, MongoCategoryRepository, handlers};
use domain_products::{MongoProductRepository, ProductService};
use std::sync::Arc;

use super::admin_only;
use crate::state::AppState;

/// Public reads plus admin writes; deletes consult the product catalog
pub fn router(state: &AppState, products: &ProductService<MongoProductRepository>) -> Router {
    let counter = Arc::new(CatalogProductsCounter::new(products.repository()));
    let service = CategoryService::new(MongoCategoryRepository::new(&state.db), counter);

    Router::new()
        .nest("/categories", handlers::router(service.clone()))
        .nest(
            "/admin/categories",
            admin_only(state, handlers::admin_router(service)),
        )
}
