use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Data access for categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// All categories sorted by name
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// `NotFound` if absent
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category>;

    /// Returns false if nothing was deleted
    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;

    async fn count(&self) -> CategoryResult<u64>;
}
