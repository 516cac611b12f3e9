//! Registration, login, profile and user administration

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use super::{admin_only, authenticated};
use crate::state::AppState;

fn service(state: &AppState) -> UserService<MongoUserRepository> {
    UserService::new(MongoUserRepository::new(&state.db), state.jwt.clone())
}

pub fn router(state: &AppState) -> Router {
    let service = service(state);

    Router::new()
        .nest("/auth", handlers::auth_router(service.clone()))
        .nest(
            "/profile",
            authenticated(state, handlers::profile_router(service.clone())),
        )
        .nest("/admin", admin_only(state, handlers::admin_router(service)))
}

/// Unique email index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))
}
