//! MongoDB connection management and helpers

mod config;
mod connector;
mod errors;
mod health;
mod serde_helpers;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use errors::is_duplicate_key;
pub use health::{HealthStatus, check_health};
pub use serde_helpers::{
    datetime_as_string, datetime_bson, format_datetime, uuid_as_string, uuid_bson,
};

pub use mongodb::{Client, Collection, Database};
