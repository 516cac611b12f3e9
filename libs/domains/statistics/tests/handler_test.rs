use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
};
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig, jwt_auth_middleware, require_admin};
use chrono::{DateTime, TimeZone, Utc};
use domain_statistics::{
    ProductFacets, SalesFacets, StatisticsRepository, StatisticsResult, StatisticsService,
    StatusCount, TimeWindow, handlers,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::BTreeMap;
use tower::ServiceExt;

struct OrderRow {
    status: &'static str,
    /// (quantity, unit price); None when the product no longer exists
    lines: Vec<(i64, Option<f64>)>,
    created_at: DateTime<Utc>,
}

struct ProductRow {
    stock: i64,
    ratings: Vec<i64>,
    created_at: DateTime<Utc>,
}

/// Applies windows the way the aggregation pipelines do
struct InMemoryStore {
    orders: Vec<OrderRow>,
    products: Vec<ProductRow>,
    categories: u64,
}

#[async_trait]
impl StatisticsRepository for InMemoryStore {
    async fn sales_facets(&self, window: TimeWindow) -> StatisticsResult<SalesFacets> {
        let orders: Vec<&OrderRow> = self
            .orders
            .iter()
            .filter(|o| window.contains(o.created_at))
            .collect();

        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for order in &orders {
            *counts.entry(order.status).or_default() += 1;
        }

        let revenue = orders
            .iter()
            .flat_map(|o| o.lines.iter())
            .map(|(qty, price)| *qty as f64 * price.unwrap_or(0.0))
            .sum();

        Ok(SalesFacets {
            status_counts: counts
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status: status.to_string(),
                    count,
                })
                .collect(),
            distinct_orders: orders.iter().filter(|o| !o.lines.is_empty()).count() as i64,
            revenue,
        })
    }

    async fn product_facets(&self, window: TimeWindow) -> StatisticsResult<ProductFacets> {
        let products: Vec<&ProductRow> = self
            .products
            .iter()
            .filter(|p| window.contains(p.created_at))
            .collect();

        Ok(ProductFacets {
            total_products: products.len() as i64,
            total_stock: products.iter().map(|p| p.stock).sum(),
            out_of_stock: products.iter().filter(|p| p.stock <= 0).count() as i64,
            total_reviews: products.iter().map(|p| p.ratings.len() as i64).sum(),
            rating_sum: products.iter().flat_map(|p| p.ratings.iter()).sum(),
        })
    }

    async fn count_categories(&self) -> StatisticsResult<u64> {
        Ok(self.categories)
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn store() -> InMemoryStore {
    InMemoryStore {
        orders: vec![
            OrderRow {
                status: "pending",
                lines: vec![(2, Some(10.0)), (1, Some(25.0))],
                created_at: at(2023, 3, 4, 10),
            },
            OrderRow {
                status: "delivered",
                lines: vec![(1, Some(30.0)), (4, None)],
                created_at: at(2023, 12, 31, 23),
            },
            OrderRow {
                status: "cancelled",
                lines: vec![(1, Some(5.0))],
                created_at: at(2022, 7, 1, 8),
            },
        ],
        products: vec![
            ProductRow {
                stock: 0,
                ratings: vec![5, 4],
                created_at: at(2023, 1, 1, 0),
            },
            ProductRow {
                stock: 12,
                ratings: vec![],
                created_at: at(2023, 6, 15, 12),
            },
            ProductRow {
                stock: 3,
                ratings: vec![1],
                created_at: at(2022, 2, 2, 2),
            },
        ],
        categories: 5,
    }
}

const SECRET: &str = "statistics-handler-test-secret-0123456789";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn token(roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    jwt()
        .create_access_token(&uuid::Uuid::now_v7().to_string(), "ops@store.io", "Ops", &roles)
        .unwrap()
}

fn app() -> Router {
    let service = StatisticsService::new(store());
    let auth = middleware::from_fn_with_state(jwt(), jwt_auth_middleware);

    Router::new().nest(
        "/admin/statistics",
        handlers::admin_router(service)
            .layer(middleware::from_fn(require_admin))
            .layer(auth),
    )
}

async fn get(uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_sales_for_a_year() {
    let admin = token(&[ADMIN_ROLE]);
    let (status, stats) = get("/admin/statistics/sales?year=2023", &admin).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_orders"], 2);
    assert_eq!(stats["pending_orders"], 1);
    assert_eq!(stats["delivered_orders"], 1);
    assert_eq!(stats["cancelled_orders"], 0);
    // 2*10 + 25 + 30, the vanished product adds nothing
    assert_eq!(stats["total_revenue"], 75.0);
    assert_eq!(stats["average_order"], 37.5);
}

#[tokio::test]
async fn test_year_and_full_range_agree() {
    let admin = token(&[ADMIN_ROLE]);

    for kind in ["sales", "products"] {
        let (_, by_year) = get(&format!("/admin/statistics/{kind}?year=2023"), &admin).await;
        let (_, by_range) = get(
            &format!("/admin/statistics/{kind}?start=2023-01-01&end=2023-12-31"),
            &admin,
        )
        .await;
        assert_eq!(by_year, by_range, "{kind}");
    }
}

#[tokio::test]
async fn test_categories_ignore_window() {
    let admin = token(&[ADMIN_ROLE]);

    let (_, all) = get("/admin/statistics/products", &admin).await;
    let (_, year) = get("/admin/statistics/products?year=2022", &admin).await;

    assert_eq!(all["total_products"], 3);
    assert_eq!(year["total_products"], 1);
    assert_eq!(all["total_categories"], 5);
    assert_eq!(year["total_categories"], 5);
}

#[tokio::test]
async fn test_product_kpis() {
    let admin = token(&[ADMIN_ROLE]);
    let (status, stats) = get("/admin/statistics/products?year=2023", &admin).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_products"], 2);
    assert_eq!(stats["total_stock"], 12);
    assert_eq!(stats["out_of_stock"], 1);
    assert_eq!(stats["total_reviews"], 2);
    assert_eq!(stats["average_rating"], 4.5);
}

#[tokio::test]
async fn test_empty_window_is_all_zero() {
    let admin = token(&[ADMIN_ROLE]);

    let (status, sales) = get("/admin/statistics/sales?year=2024", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales["total_orders"], 0);
    assert_eq!(sales["total_revenue"], 0.0);
    assert_eq!(sales["average_order"], 0.0);

    let (_, products) = get("/admin/statistics/products?year=2024", &admin).await;
    assert_eq!(products["total_products"], 0);
    assert_eq!(products["average_rating"], 0.0);
}

#[tokio::test]
async fn test_bad_windows_are_rejected() {
    let admin = token(&[ADMIN_ROLE]);

    for uri in [
        "/admin/statistics/sales?start=2023-12-31&end=2023-01-01",
        "/admin/statistics/sales?start=2023/01/01&end=2023-12-31",
        "/admin/statistics/products?year=1800",
        "/admin/statistics/products?year=twenty",
    ] {
        let (status, body) = get(uri, &admin).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_statistics_are_admin_only() {
    let user = token(&["user"]);
    let (status, _) = get("/admin/statistics/sales", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
