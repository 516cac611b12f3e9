//! Stateless JWT authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 access tokens
//! - [`jwt_auth_middleware`] rejects requests without a valid token and stores
//!   the [`JwtClaims`] in request extensions
//! - [`require_admin`] gates routes on the `admin` role
//! - [`CurrentUser`] hands the verified claims to handlers
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware, require_admin};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let admin = Router::new()
//!     .route("/categories", post(create_category))
//!     .route_layer(axum::middleware::from_fn(require_admin))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use extractor::CurrentUser;
pub use jwt::{ADMIN_ROLE, JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, require_admin};
