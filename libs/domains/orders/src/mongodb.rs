//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{datetime_bson, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter, OrderStatus};
use crate::repository::OrderRepository;

pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Order>("orders");
        Self { collection }
    }

    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_created".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    fn owner_filter(owner: Option<Uuid>) -> Document {
        match owner {
            Some(user_id) => doc! { "user_id": uuid_bson(&user_id) },
            None => doc! {},
        }
    }

    fn id_filter(id: Uuid, owner: Option<Uuid>) -> Document {
        let mut filter = Self::owner_filter(owner);
        filter.insert("_id", uuid_bson(&id));
        filter
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list(&self, owner: Option<Uuid>, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let options = FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(Self::owner_filter(owner))
            .with_options(options)
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn count(&self, owner: Option<Uuid>) -> OrderResult<u64> {
        let count = self
            .collection
            .count_documents(Self::owner_filter(owner))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid, owner: Option<Uuid>) -> OrderResult<Option<Order>> {
        let order = self.collection.find_one(Self::id_filter(id, owner)).await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        let update = doc! {
            "$set": {
                "status": status.to_string(),
                "updated_at": datetime_bson(&now),
            }
        };

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id, None), update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }
}
