use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{
    AppError, CurrentUser, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{AddWishlistItem, WishlistFilter, WishlistItem, WishlistList};
use crate::repository::WishlistRepository;
use crate::service::WishlistService;

#[derive(OpenApi)]
#[openapi(
    paths(list_items, add_item, remove_item),
    components(
        schemas(WishlistItem, WishlistList, WishlistFilter, AddWishlistItem),
        responses(
            BadRequestResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Wishlist", description = "Saved products of the current user")
    )
)]
pub struct ApiDoc;

/// Wishlist routes; the caller must layer JWT auth on top
pub fn router<R: WishlistRepository + 'static>(service: WishlistService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(add_item))
        .route("/{id}", delete(remove_item))
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = "Wishlist",
    params(WishlistFilter),
    responses(
        (status = 200, description = "Page of wishlist items", body = WishlistList),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_items<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    user: CurrentUser,
    ValidatedQuery(filter): ValidatedQuery<WishlistFilter>,
) -> Result<Json<WishlistList>, AppError> {
    let page = service.list_items(user.user_id()?, filter).await?;
    Ok(Json(page))
}

/// Save a product that is currently in stock
#[utoipa::path(
    post,
    path = "",
    tag = "Wishlist",
    request_body = AddWishlistItem,
    responses(
        (status = 201, description = "Item saved", body = WishlistItem),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn add_item<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<AddWishlistItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = service.add_item(user.user_id()?, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Wishlist",
    params(
        ("id" = Uuid, Path, description = "Wishlist item ID")
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn remove_item<R: WishlistRepository>(
    State(service): State<Arc<WishlistService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    service.remove_item(user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
