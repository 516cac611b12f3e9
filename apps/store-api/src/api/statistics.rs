use axum::Router;
use domain_statistics::{MongoStatisticsRepository, StatisticsService, handlers};

use super::admin_only;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = StatisticsService::new(MongoStatisticsRepository::new(&state.db));

    Router::new().nest("/admin/stats", admin_only(state, handlers::admin_router(service)))
}
