//! API routes module
//!
//! Everything here is nested under `/api` by `axum_helpers::create_router`.

pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod statistics;
pub mod users;
pub mod wishlist;

use axum::{Router, middleware};
use axum_helpers::{health_router, jwt_auth_middleware, require_admin};

use crate::state::AppState;

/// Requires a valid bearer token (or `access_token` cookie)
fn authenticated(state: &AppState, router: Router) -> Router {
    router.layer(middleware::from_fn_with_state(
        state.jwt.clone(),
        jwt_auth_middleware,
    ))
}

/// Requires a valid token carrying the admin role
fn admin_only(state: &AppState, router: Router) -> Router {
    authenticated(state, router.layer(middleware::from_fn(require_admin)))
}

/// All `/v1` routes
pub fn routes(state: &AppState) -> Router {
    let catalog = products::service(state);

    let v1 = Router::new()
        .merge(health_router(state.config.app))
        .merge(users::router(state))
        .merge(categories::router(state, &catalog))
        .merge(orders::router(state, &catalog))
        .merge(wishlist::router(state, &catalog))
        .merge(products::router(state, catalog))
        .merge(statistics::router(state));

    Router::new().nest("/v1", v1)
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await?;
    products::init_indexes(state).await?;
    orders::init_indexes(state).await?;
    wishlist::init_indexes(state).await?;
    tracing::info!("MongoDB indexes ready");
    Ok(())
}
