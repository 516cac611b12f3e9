use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::ProductStock;
use crate::error::{WishlistError, WishlistResult};
use crate::models::{AddWishlistItem, WishlistFilter, WishlistItem, WishlistList};
use crate::repository::WishlistRepository;

pub struct WishlistService<R: WishlistRepository> {
    repository: Arc<R>,
    products: Arc<dyn ProductStock>,
}

impl<R: WishlistRepository> WishlistService<R> {
    pub fn new(repository: R, products: Arc<dyn ProductStock>) -> Self {
        Self {
            repository: Arc::new(repository),
            products,
        }
    }

    /// Only products that exist and are in stock can be saved
    #[instrument(skip(self, input))]
    pub async fn add_item(
        &self,
        user_id: Uuid,
        input: AddWishlistItem,
    ) -> WishlistResult<WishlistItem> {
        let product_id = Uuid::parse_str(input.product_id.trim())
            .map_err(|_| WishlistError::InvalidProduct)?;

        let stock = self
            .products
            .stock_of(product_id)
            .await?
            .ok_or(WishlistError::InvalidProduct)?;
        if stock < 1 {
            return Err(WishlistError::ProductOutOfStock);
        }

        self.repository
            .add(WishlistItem::new(user_id, product_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        user_id: Uuid,
        filter: WishlistFilter,
    ) -> WishlistResult<WishlistList> {
        filter
            .validate()
            .map_err(|e| WishlistError::Validation(e.to_string()))?;

        let items = self.repository.list(user_id, &filter).await?;
        let total = self.repository.count(user_id).await?;

        Ok(WishlistList {
            items,
            total,
            offset: filter.offset,
            limit: filter.limit,
        })
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: Uuid, id: Uuid) -> WishlistResult<()> {
        if !self.repository.delete(user_id, id).await? {
            return Err(WishlistError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: WishlistRepository> Clone for WishlistService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
        }
    }
}
