use async_trait::async_trait;
use uuid::Uuid;

use crate::error::WishlistResult;
use crate::models::{WishlistFilter, WishlistItem};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// `AlreadyExists` if the user already saved this product
    async fn add(&self, item: WishlistItem) -> WishlistResult<WishlistItem>;

    /// The user's items, newest first
    async fn list(
        &self,
        user_id: Uuid,
        filter: &WishlistFilter,
    ) -> WishlistResult<Vec<WishlistItem>>;

    async fn count(&self, user_id: Uuid) -> WishlistResult<u64>;

    /// Deletes only the user's own item; false if nothing matched
    async fn delete(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool>;
}
