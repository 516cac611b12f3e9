use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use domain_categories::{
    Category, CategoryError, CategoryRepository, CategoryResult, CategoryService, CreateCategory,
    ProductsCounter, UpdateCategory, handlers,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Default)]
struct InMemoryCategories {
    categories: Arc<Mutex<Vec<Category>>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CategoryError::NotFound(id))?;
        if let Some(name) = input.name {
            category.name = name;
        }
        if let Some(description) = input.description {
            category.description = description;
        }
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }

    async fn count(&self) -> CategoryResult<u64> {
        Ok(self.categories.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
struct FixedCounts(HashMap<Uuid, u64>);

#[async_trait]
impl ProductsCounter for FixedCounts {
    async fn count_by_category(&self, category_id: Uuid) -> CategoryResult<u64> {
        Ok(self.0.get(&category_id).copied().unwrap_or(0))
    }
}

fn app(repo: InMemoryCategories, counts: FixedCounts) -> Router {
    let service = CategoryService::new(repo, Arc::new(counts));
    Router::new()
        .nest("/categories", handlers::router(service.clone()))
        .nest("/admin/categories", handlers::admin_router(service))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn seeded(names: &[&str]) -> (InMemoryCategories, Vec<Uuid>) {
    let repo = InMemoryCategories::default();
    let mut ids = Vec::new();
    for name in names {
        let category = Category::new(CreateCategory {
            name: name.to_string(),
            description: String::new(),
        });
        ids.push(category.id);
        repo.categories.lock().unwrap().push(category);
    }
    (repo, ids)
}

#[tokio::test]
async fn test_list_sorted_by_name() {
    let (repo, _) = seeded(&["Mice", "Audio", "Keyboards"]);

    let request = Request::get("/categories").body(Body::empty()).unwrap();
    let (status, body) = send(app(repo, FixedCounts::default()), request).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Audio", "Keyboards", "Mice"]);
}

#[tokio::test]
async fn test_create_category() {
    let request = Request::post("/admin/categories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "name": " Webcams ", "description": "HD" }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(
        app(InMemoryCategories::default(), FixedCounts::default()),
        request,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Webcams");
}

#[tokio::test]
async fn test_delete_guarded_by_product_count() {
    let (repo, ids) = seeded(&["Mice", "Audio"]);
    let counts = FixedCounts(HashMap::from([(ids[0], 2)]));
    let app = app(repo, counts);

    let request = Request::delete(format!("/admin/categories/{}", ids[0]))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let request = Request::delete(format!("/admin/categories/{}", ids[1]))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_get_missing_category() {
    let request = Request::get(format!("/categories/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(
        app(InMemoryCategories::default(), FixedCounts::default()),
        request,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
