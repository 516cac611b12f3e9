//! # Axum Helpers
//!
//! Shared building blocks for the store's Axum services.
//!
//! - **[`auth`]**: stateless JWT issue/verify, auth and admin middleware, [`CurrentUser`]
//! - **[`server`]**: router assembly with OpenAPI UIs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the shared JSON error body
//! - **[`extractors`]**: UUID path, validated JSON and validated query extractors
//! - **[`clock`]**: injectable time source
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.server)?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod clock;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ADMIN_ROLE, CurrentUser, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware, require_admin,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use clock::{Clock, fixed_clock, system_clock};

pub use extractors::{UuidPath, UuidPathPair, ValidatedJson, ValidatedQuery};
