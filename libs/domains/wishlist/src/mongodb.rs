//! MongoDB implementation of WishlistRepository

use async_trait::async_trait;
use database::mongodb::uuid_bson;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::WishlistResult;
use crate::models::{WishlistFilter, WishlistItem};
use crate::repository::WishlistRepository;

pub struct MongoWishlistRepository {
    collection: Collection<WishlistItem>,
}

impl MongoWishlistRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<WishlistItem>("wishlist");
        Self { collection }
    }

    pub async fn init_indexes(&self) -> WishlistResult<()> {
        let indexes = vec![
            // One entry per (user, product); duplicates surface as AlreadyExists
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "product_id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_product_unique".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_created".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Wishlist indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl WishlistRepository for MongoWishlistRepository {
    #[instrument(skip(self, item), fields(user_id = %item.user_id, product_id = %item.product_id))]
    async fn add(&self, item: WishlistItem) -> WishlistResult<WishlistItem> {
        self.collection.insert_one(&item).await?;

        tracing::info!(item_id = %item.id, "Wishlist item added");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        user_id: Uuid,
        filter: &WishlistFilter,
    ) -> WishlistResult<Vec<WishlistItem>> {
        let options = FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "user_id": uuid_bson(&user_id) })
            .with_options(options)
            .await?;
        let items: Vec<WishlistItem> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self))]
    async fn count(&self, user_id: Uuid) -> WishlistResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": uuid_bson(&user_id) })
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Uuid, id: Uuid) -> WishlistResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": uuid_bson(&id), "user_id": uuid_bson(&user_id) })
            .await?;

        if result.deleted_count > 0 {
            tracing::info!(item_id = %id, "Wishlist item removed");
        }
        Ok(result.deleted_count > 0)
    }
}
