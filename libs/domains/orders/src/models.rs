use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Stored line item; prices are resolved when the order is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub product_id: Uuid,
    pub quantity: i64,
}

/// Order entity - stored in the `orders` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(
        rename = "_id",
        alias = "id",
        with = "database::mongodb::uuid_as_string"
    )]
    pub id: Uuid,
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub updated_at: DateTime<Utc>,
}

/// Line item priced at the product's current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricedItem {
    pub product_id: Uuid,
    pub quantity: i64,
    pub unit_price: f64,
    /// `unit_price * quantity`
    pub line_total: f64,
}

/// Order as returned to clients; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricedOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<PricedItem>,
    pub status: OrderStatus,
    /// Sum of the line totals
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product ids arrive as strings so a malformed one is reported as an invalid product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderItem {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[serde(default)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct OrderFilter {
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of results (1-100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl Default for OrderFilter {
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
pub struct OrderList {
    pub items: Vec<PricedOrder>,
    pub total: u64,
    pub offset: u64,
    pub limit: i64,
}

/// Unknown status values are rejected while the body is parsed
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FindOrder {
    pub order_id: String,
}
