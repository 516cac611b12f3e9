use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StatisticsResult;
use crate::models::{ProductStatistics, SalesStatistics, StatsQuery};
use crate::repository::StatisticsRepository;
use crate::service::StatisticsService;

#[derive(OpenApi)]
#[openapi(
    paths(sales_statistics, product_statistics),
    components(
        schemas(SalesStatistics, ProductStatistics, StatsQuery),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Statistics (admin)", description = "Sales and catalog KPIs")
    )
)]
pub struct AdminApiDoc;

/// Admin routes; the caller must layer JWT auth and the admin check on top
pub fn admin_router<R: StatisticsRepository + 'static>(service: StatisticsService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/sales", get(sales_statistics))
        .route("/products", get(product_statistics))
        .with_state(shared_service)
}

/// Order KPIs; `year` wins over `start`/`end`
#[utoipa::path(
    get,
    path = "/sales",
    tag = "Statistics (admin)",
    params(StatsQuery),
    responses(
        (status = 200, description = "Sales KPIs", body = SalesStatistics),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn sales_statistics<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    ValidatedQuery(query): ValidatedQuery<StatsQuery>,
) -> StatisticsResult<Json<SalesStatistics>> {
    let stats = service.sales_statistics(&query).await?;
    Ok(Json(stats))
}

/// Catalog KPIs; the category count is never windowed
#[utoipa::path(
    get,
    path = "/products",
    tag = "Statistics (admin)",
    params(StatsQuery),
    responses(
        (status = 200, description = "Catalog KPIs", body = ProductStatistics),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn product_statistics<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    ValidatedQuery(query): ValidatedQuery<StatsQuery>,
) -> StatisticsResult<Json<ProductStatistics>> {
    let stats = service.product_statistics(&query).await?;
    Ok(Json(stats))
}
