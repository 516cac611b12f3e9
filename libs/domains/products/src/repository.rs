use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, Review, UpdateProduct};

/// Data access for products and their embedded reviews
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Page sorted newest first
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    /// Sets the present fields and `updated_at`; `NotFound` if absent
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Deletes only when stock < 1.
    ///
    /// `NotFound` if absent, `CannotDeleteProduct` if stock remains.
    async fn delete(&self, id: Uuid) -> ProductResult<()>;

    /// Single conditional update guarded by `stock >= quantity`.
    ///
    /// `NotFound` if absent, `InsufficientStock` if the guard fails.
    async fn decrement_stock(&self, id: Uuid, quantity: i64) -> ProductResult<()>;

    /// `NotFound` if the product is absent
    async fn add_review(&self, product_id: Uuid, review: Review) -> ProductResult<Review>;

    /// Removes the review, restricted to `author` when given.
    ///
    /// `NotFound` if the product is absent, `ReviewNotFound` if nothing was removed.
    async fn delete_review(
        &self,
        product_id: Uuid,
        review_id: Uuid,
        author: Option<Uuid>,
    ) -> ProductResult<()>;

    async fn count_by_category(&self, category_id: Uuid) -> ProductResult<u64>;
}
