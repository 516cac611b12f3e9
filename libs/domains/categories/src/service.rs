use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::products::ProductsCounter;
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    products: Arc<dyn ProductsCounter>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R, products: Arc<dyn ProductsCounter>) -> Self {
        Self {
            repository: Arc::new(repository),
            products,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_category(&self, mut input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        input.name = normalize_name(&input.name)?;
        input.description = input.description.trim().to_string();

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        mut input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if let Some(ref name) = input.name {
            input.name = Some(normalize_name(name)?);
        }
        if let Some(ref description) = input.description {
            input.description = Some(description.trim().to_string());
        }

        if input.is_empty() {
            return self.get_category(id).await;
        }

        self.repository.update(id, input).await
    }

    /// Refused while any product still references the category
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        let referencing = self.products.count_by_category(id).await?;
        if referencing > 0 {
            tracing::info!(category_id = %id, referencing, "Category still has products");
            return Err(CategoryError::HasProducts(id));
        }

        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}

fn normalize_name(name: &str) -> CategoryResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::Validation("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
        }
    }
}
