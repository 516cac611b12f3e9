//! Product Service - Business logic layer

use axum_helpers::{Clock, system_clock};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    AddReview, CreateProduct, Product, ProductFilter, ProductList, Review, UpdateProduct,
};
use crate::repository::ProductRepository;

const MAX_COMMENT_CHARS: usize = 500;

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    clock: Clock,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            clock: system_clock(),
        }
    }

    /// Replaces the time source used to stamp reviews
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Shared handle to the repository, for adapters in other domains
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, mut input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        input.name = normalize_name(&input.name)?;
        input.description = input.description.trim().to_string();

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<ProductList> {
        filter
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let items = self.repository.list(&filter).await?;
        let total = self.repository.count(&filter).await?;

        Ok(ProductList {
            items,
            total,
            offset: filter.offset,
            limit: filter.limit,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        mut input: UpdateProduct,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if let Some(ref name) = input.name {
            input.name = Some(normalize_name(name)?);
        }
        if let Some(ref description) = input.description {
            input.description = Some(description.trim().to_string());
        }

        if input.is_empty() {
            return self.get_product(id).await;
        }

        self.repository.update(id, input).await
    }

    /// Only products with stock below 1 can be deleted
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Atomically removes `quantity` units; never drives stock negative
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: Uuid, quantity: i64) -> ProductResult<Product> {
        if quantity <= 0 {
            return Err(ProductError::Validation(
                "quantity must be greater than 0".to_string(),
            ));
        }

        self.repository.decrement_stock(id, quantity).await?;
        self.get_product(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn add_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        input: AddReview,
    ) -> ProductResult<Review> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let comment = input.comment.trim().to_string();
        if comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(ProductError::Validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }

        let review = Review {
            id: Uuid::now_v7(),
            user_id,
            rating: input.rating,
            comment,
            created_at: (self.clock)(),
        };

        self.repository.add_review(product_id, review).await
    }

    /// Authors delete their own reviews; admins delete any
    #[instrument(skip(self))]
    pub async fn delete_review(
        &self,
        product_id: Uuid,
        review_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> ProductResult<()> {
        let author = (!is_admin).then_some(user_id);
        self.repository
            .delete_review(product_id, review_id, author)
            .await
    }
}

fn normalize_name(name: &str) -> ProductResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::Validation("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use axum_helpers::fixed_clock;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::*;

    fn product(stock: i64) -> Product {
        Product::new(CreateProduct {
            category_id: Uuid::now_v7(),
            name: "Mouse".into(),
            description: String::new(),
            price: 25.0,
            stock,
        })
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|input| input.name == "Mouse" && input.description == "wireless")
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(repo);
        let created = service
            .create_product(CreateProduct {
                category_id: Uuid::now_v7(),
                name: "  Mouse ".into(),
                description: " wireless ".into(),
                price: 10.0,
                stock: 2,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Mouse");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_before_storage() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().times(0);

        let service = ProductService::new(repo);
        let result = service
            .create_product(CreateProduct {
                category_id: Uuid::now_v7(),
                name: "   ".into(),
                description: String::new(),
                price: 10.0,
                stock: 0,
            })
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().times(0);

        let service = ProductService::new(repo);
        let result = service
            .create_product(CreateProduct {
                category_id: Uuid::now_v7(),
                name: "Mouse".into(),
                description: String::new(),
                price: -1.0,
                stock: 0,
            })
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.get_product(id).await,
            Err(ProductError::NotFound(found)) if found == id
        ));
    }

    #[tokio::test]
    async fn test_list_returns_page_and_total() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|_| Ok(vec![product(1), product(2)]));
        repo.expect_count().times(1).returning(|_| Ok(7));

        let service = ProductService::new(repo);
        let page = service
            .list_products(ProductFilter {
                offset: 2,
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 7);
        assert_eq!(page.offset, 2);
        assert_eq!(page.limit, 2);
    }

    #[tokio::test]
    async fn test_list_rejects_oversized_limit() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().times(0);

        let service = ProductService::new(repo);
        let result = service
            .list_products(ProductFilter {
                limit: 101,
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_product() {
        let existing = product(3);
        let id = existing.id;
        let mut repo = MockProductRepository::new();
        repo.expect_update().times(0);
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = ProductService::new(repo);
        let current = service
            .update_product(id, UpdateProduct::default())
            .await
            .unwrap();
        assert_eq!(current.id, id);
    }

    #[tokio::test]
    async fn test_delete_with_stock_is_rejected() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Err(ProductError::CannotDeleteProduct));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.delete_product(id).await,
            Err(ProductError::CannotDeleteProduct)
        ));
    }

    #[tokio::test]
    async fn test_decrement_rejects_zero_quantity() {
        let mut repo = MockProductRepository::new();
        repo.expect_decrement_stock().times(0);

        let service = ProductService::new(repo);
        let result = service.decrement_stock(Uuid::now_v7(), 0).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_decrement_insufficient_stock() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_decrement_stock()
            .with(eq(id), eq(5))
            .times(1)
            .returning(|id, _| Err(ProductError::InsufficientStock(id)));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.decrement_stock(id, 5).await,
            Err(ProductError::InsufficientStock(_))
        ));
    }

    #[tokio::test]
    async fn test_add_review_rejects_rating_out_of_range() {
        let mut repo = MockProductRepository::new();
        repo.expect_add_review().times(0);

        let service = ProductService::new(repo);
        for rating in [0, 6] {
            let result = service
                .add_review(
                    Uuid::now_v7(),
                    Uuid::now_v7(),
                    AddReview {
                        rating,
                        comment: String::new(),
                    },
                )
                .await;
            assert!(matches!(result, Err(ProductError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_add_review_rejects_long_comment() {
        let mut repo = MockProductRepository::new();
        repo.expect_add_review().times(0);

        let service = ProductService::new(repo);
        let result = service
            .add_review(
                Uuid::now_v7(),
                Uuid::now_v7(),
                AddReview {
                    rating: 4,
                    comment: "x".repeat(501),
                },
            )
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_review_stamps_author_and_clock() {
        let product_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let reviewed_at = Utc.with_ymd_and_hms(2024, 5, 4, 8, 15, 0).unwrap();
        let mut repo = MockProductRepository::new();
        repo.expect_add_review()
            .withf(move |pid, review| {
                *pid == product_id
                    && review.user_id == user_id
                    && review.comment == "great"
                    && review.created_at == reviewed_at
            })
            .times(1)
            .returning(|_, review| Ok(review));

        let service = ProductService::new(repo).with_clock(fixed_clock(reviewed_at));
        let review = service
            .add_review(
                product_id,
                user_id,
                AddReview {
                    rating: 5,
                    comment: " great ".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.created_at, reviewed_at);
    }

    #[tokio::test]
    async fn test_delete_review_scopes_to_author_unless_admin() {
        let product_id = Uuid::now_v7();
        let review_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();

        let mut repo = MockProductRepository::new();
        repo.expect_delete_review()
            .with(eq(product_id), eq(review_id), eq(Some(user_id)))
            .times(1)
            .returning(|_, _, _| Ok(()));
        repo.expect_delete_review()
            .with(eq(product_id), eq(review_id), eq(None))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = ProductService::new(repo);
        service
            .delete_review(product_id, review_id, user_id, false)
            .await
            .unwrap();
        service
            .delete_review(product_id, review_id, user_id, true)
            .await
            .unwrap();
    }
}
