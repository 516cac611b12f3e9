//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use database::mongodb::{datetime_bson, uuid_bson};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, Review, UpdateProduct};
use crate::repository::ProductRepository;

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Listing by category, newest first; also backs the category delete guard
            IndexModel::builder()
                .keys(doc! { "category_id": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_created".to_string())
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
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": uuid_bson(&id) }
    }

    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category_id) = filter.category_id {
            doc.insert("category_id", uuid_bson(category_id));
        }

        doc
    }

    fn build_update(input: &UpdateProduct) -> Document {
        let mut set = doc! { "updated_at": datetime_bson(&Utc::now()) };

        if let Some(ref category_id) = input.category_id {
            set.insert("category_id", uuid_bson(category_id));
        }
        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = input.description {
            set.insert("description", description.as_str());
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(stock) = input.stock {
            set.insert("stock", stock);
        }

        doc! { "$set": set }
    }

    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        let count = self.collection.count_documents(Self::id_filter(id)).await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), Self::build_update(&input))
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let filter = doc! { "_id": uuid_bson(&id), "stock": { "$lt": 1 } };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            if !self.exists(id).await? {
                return Err(ProductError::NotFound(id));
            }
            return Err(ProductError::CannotDeleteProduct);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn decrement_stock(&self, id: Uuid, quantity: i64) -> ProductResult<()> {
        let filter = doc! { "_id": uuid_bson(&id), "stock": { "$gte": quantity } };
        let update = doc! {
            "$inc": { "stock": -quantity },
            "$set": { "updated_at": datetime_bson(&Utc::now()) }
        };

        let result = self.collection.update_one(filter, update).await?;

        if result.matched_count == 0 {
            if !self.exists(id).await? {
                return Err(ProductError::NotFound(id));
            }
            return Err(ProductError::InsufficientStock(id));
        }

        tracing::info!(product_id = %id, quantity, "Stock decremented");
        Ok(())
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn add_review(&self, product_id: Uuid, review: Review) -> ProductResult<Review> {
        let update = doc! { "$push": { "reviews": to_bson(&review)? } };
        let result = self
            .collection
            .update_one(Self::id_filter(product_id), update)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product_id));
        }

        tracing::info!(product_id = %product_id, "Review added");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn delete_review(
        &self,
        product_id: Uuid,
        review_id: Uuid,
        author: Option<Uuid>,
    ) -> ProductResult<()> {
        let mut pull = doc! { "id": uuid_bson(&review_id) };
        if let Some(ref author) = author {
            pull.insert("user_id", uuid_bson(author));
        }

        let result = self
            .collection
            .update_one(
                Self::id_filter(product_id),
                doc! { "$pull": { "reviews": pull } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product_id));
        }
        if result.modified_count == 0 {
            return Err(ProductError::ReviewNotFound(review_id));
        }

        tracing::info!(product_id = %product_id, review_id = %review_id, "Review deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_category(&self, category_id: Uuid) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "category_id": uuid_bson(&category_id) })
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_category() {
        let category_id = Uuid::now_v7();
        let filter = ProductFilter {
            category_id: Some(category_id),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc.get_str("category_id").unwrap(), category_id.to_string());
    }

    #[test]
    fn test_build_update_sets_only_present_fields() {
        let update = MongoProductRepository::build_update(&UpdateProduct {
            price: Some(12.5),
            ..Default::default()
        });
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_f64("price").unwrap(), 12.5);
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("stock"));
    }
}
