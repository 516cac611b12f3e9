use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Review embedded in its product document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub id: Uuid,
    /// Author
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub user_id: Uuid,
    /// 1 to 5
    pub rating: i32,
    pub comment: String,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub created_at: DateTime<Utc>,
}

/// Product entity - stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(
        rename = "_id",
        alias = "id",
        with = "database::mongodb::uuid_as_string"
    )]
    pub id: Uuid,
    #[serde(with = "database::mongodb::uuid_as_string")]
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, always positive
    pub price: f64,
    /// Units on hand, never negative
    pub stock: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::datetime_as_string")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i64,
}

/// DTO for updating an existing product; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Only products of this category
    pub category_id: Option<Uuid>,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of results (1-100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 {
    20
}

/// One page of products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
    pub total: u64,
    pub offset: u64,
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DecrementStock {
    #[validate(range(min = 1))]
    pub quantity: i64,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.reviews.iter().map(|r| i64::from(r.rating)).sum();
        sum as f64 / self.reviews.len() as f64
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
