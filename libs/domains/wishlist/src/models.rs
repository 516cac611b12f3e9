use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Wishlist entry - stored in the `wishlist` collection, unique per (user, product)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WishlistItem {
    #[serde(
        rename = "_id",
        alias = "id",
        with = "database::mongodb::uuid_as_string"
    )]
    pub id: Uuid,
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub user_id: Uuid,
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub product_id: Uuid,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(user_id: Uuid, product_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            product_id,
            created_at: Utc::now(),
        }
    }
}

/// Product id as sent by the client; a malformed id is an invalid product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddWishlistItem {
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct WishlistFilter {
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of results (1-100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl Default for WishlistFilter {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistList {
    pub items: Vec<WishlistItem>,
    pub total: u64,
    pub offset: u64,
    pub limit: i64,
}
