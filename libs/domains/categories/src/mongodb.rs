//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::{datetime_bson, uuid_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::{FindOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Category>("categories");
        Self { collection }
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": uuid_bson(&id) }
    }

    fn build_update(input: &UpdateCategory) -> Document {
        let mut set = doc! { "updated_at": datetime_bson(&Utc::now()) };

        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = input.description {
            set.insert("description", description.as_str());
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);

        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let category = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category> {
        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), Self::build_update(&input))
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        tracing::info!(category_id = %id, "Category updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(category_id = %id, "Category deleted");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> CategoryResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_only_present_fields() {
        let update = MongoCategoryRepository::build_update(&UpdateCategory {
            name: Some("Mice".into()),
            description: None,
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("name").unwrap(), "Mice");
        assert!(!set.contains_key("description"));
        assert!(set.get_str("updated_at").is_ok());
    }

    #[test]
    fn test_id_filter_uses_string_id() {
        let id = Uuid::now_v7();
        let filter = MongoCategoryRepository::id_filter(id);
        assert_eq!(filter.get_str("_id").unwrap(), id.to_string());
    }
}
