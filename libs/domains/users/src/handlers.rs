//! HTTP handlers for Users API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, CurrentUser, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    AuthResponse, LoginRequest, PublicUser, RegisterRequest, Role, UpdateProfile, UserFilter,
    UserList,
};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(
        schemas(AuthResponse, PublicUser, Role, RegisterRequest, LoginRequest),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login")
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(get_profile, update_profile),
    components(
        schemas(PublicUser, Role, UpdateProfile),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Profile", description = "The current user's profile")
    )
)]
pub struct ProfileApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(register_admin, list_users),
    components(
        schemas(AuthResponse, PublicUser, UserList, UserFilter, RegisterRequest),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users (admin)", description = "Account administration")
    )
)]
pub struct AdminApiDoc;

/// Public registration and login
pub fn auth_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(shared_service)
}

/// Profile routes; the caller must layer JWT auth on top
pub fn profile_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .with_state(shared_service)
}

/// Admin routes; the caller must layer JWT auth and the admin check on top
pub fn admin_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/auth/register", post(register_admin))
        .route("/users", get(list_users))
        .with_state(shared_service)
}

/// Create a regular account and sign in
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let auth = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(auth)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let auth = service.login(input).await?;
    Ok(Json(auth))
}

#[utoipa::path(
    get,
    path = "",
    tag = "Profile",
    responses(
        (status = 200, description = "Current user", body = PublicUser),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_profile<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
) -> Result<Json<PublicUser>, AppError> {
    let profile = service.get_profile(user.user_id()?).await?;
    Ok(Json(profile))
}

/// Update name, address, phone or bio
#[utoipa::path(
    put,
    path = "",
    tag = "Profile",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = PublicUser),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_profile<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<UpdateProfile>,
) -> Result<Json<PublicUser>, AppError> {
    let profile = service.update_profile(user.user_id()?, input).await?;
    Ok(Json(profile))
}

/// Create an administrator account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Users (admin)",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin created", body = AuthResponse),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn register_admin<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let auth = service.register_admin(input).await?;
    Ok((StatusCode::CREATED, Json(auth)))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users (admin)",
    params(UserFilter),
    responses(
        (status = 200, description = "Page of users, oldest first", body = UserList),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> UserResult<Json<UserList>> {
    let page = service.list_users(filter).await?;
    Ok(Json(page))
}
