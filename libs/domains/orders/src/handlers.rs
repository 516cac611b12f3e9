//! HTTP handlers for Orders API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AppError, CurrentUser, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, CreateOrderItem, FindOrder, OrderFilter, OrderList, OrderStatus, PricedItem,
    PricedOrder, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order),
    components(
        schemas(
            PricedOrder, PricedItem, OrderList, OrderFilter, OrderStatus,
            CreateOrder, CreateOrderItem
        ),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Checkout and order history")
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(update_order_status, find_order),
    components(
        schemas(PricedOrder, UpdateOrderStatus, FindOrder, OrderStatus),
        responses(
            BadRequestResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders (admin)", description = "Order administration")
    )
)]
pub struct AdminApiDoc;

/// Order routes; the caller must layer JWT auth on top
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .with_state(shared_service)
}

/// Admin routes; the caller must layer JWT auth and the admin check on top
pub fn admin_router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/find", post(find_order))
        .route("/{id}/status", put(update_order_status))
        .with_state(shared_service)
}

/// List the caller's orders (admins see all), newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Page of priced orders", body = OrderList),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: CurrentUser,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> Result<Json<OrderList>, AppError> {
    let user_id = user.user_id()?;
    let page = service.list_orders(user_id, user.is_admin(), filter).await?;
    Ok(Json(page))
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = PricedOrder),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create_order(user.user_id().ok(), input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get one of the caller's orders (admins: any order)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Priced order", body = PricedOrder),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<Json<PricedOrder>, AppError> {
    let user_id = user.user_id()?;
    let order = service.get_order(id, user_id, user.is_admin()).await?;
    Ok(Json(order))
}

#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "Orders (admin)",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order updated", body = PricedOrder),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_order_status<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<Json<PricedOrder>> {
    let order = service.update_status(id, input.status).await?;
    Ok(Json(order))
}

/// Look up any order by the id in the request body
#[utoipa::path(
    post,
    path = "/find",
    tag = "Orders (admin)",
    request_body = FindOrder,
    responses(
        (status = 200, description = "Priced order", body = PricedOrder),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn find_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<FindOrder>,
) -> OrderResult<Json<PricedOrder>> {
    let order = service.find_order(&input.order_id).await?;
    Ok(Json(order))
}
