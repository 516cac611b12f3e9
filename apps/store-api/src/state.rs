//! Shared application state.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Cloned into route builders; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the driver's connection pool
    pub mongo_client: Client,
    pub db: Database,
    /// Issues tokens for users and verifies them in the auth middleware
    pub jwt: JwtAuth,
}
