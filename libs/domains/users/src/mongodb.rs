//! MongoDB implementation of UserRepository

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

use crate::error::UserResult;
use crate::models::{UpdateProfile, User, UserFilter};
use crate::repository::UserRepository;

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_email_unique".to_string())
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    fn build_update(update: &UpdateProfile, now: DateTime<Utc>) -> Document {
        let mut set = doc! { "updated_at": datetime_bson(&now) };

        if let Some(ref name) = update.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref address) = update.address {
            set.insert("address", address.as_str());
        }
        if let Some(ref phone) = update.phone {
            set.insert("phone", phone.as_str());
        }
        if let Some(ref bio) = update.bio {
            set.insert("bio", bio.as_str());
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(role = %user.role, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "_id": uuid_bson(&id) })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfile,
        now: DateTime<Utc>,
    ) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one_and_update(doc! { "_id": uuid_bson(&id) }, Self::build_update(&update, now))
            .return_document(ReturnDocument::After)
            .await?;

        if user.is_some() {
            tracing::info!(user_id = %id, "Profile updated");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter) -> UserResult<Vec<User>> {
        let options = FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> UserResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
