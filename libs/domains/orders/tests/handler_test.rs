//! Router-level tests over in-memory orders and a fixed price list

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
};
use axum_helpers::{ADMIN_ROLE, JwtAuth, JwtConfig, jwt_auth_middleware, require_admin};
use chrono::{DateTime, TimeZone, Utc};
use domain_orders::{
    Clock, Order, OrderFilter, OrderItem, OrderRepository, OrderResult, OrderService,
    OrderStatus, ProductPrices, handlers,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Default)]
struct InMemoryOrders {
    orders: Arc<Mutex<Vec<Order>>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn list(&self, owner: Option<Uuid>, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let orders = self.orders.lock().unwrap();
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|o| owner.is_none_or(|u| u == o.user_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, owner: Option<Uuid>) -> OrderResult<u64> {
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| owner.is_none_or(|u| u == o.user_id))
            .count() as u64)
    }

    async fn get_by_id(&self, id: Uuid, owner: Option<Uuid>) -> OrderResult<Option<Order>> {
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .find(|o| o.id == id && owner.is_none_or(|u| u == o.user_id))
            .cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> OrderResult<Option<Order>> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.status = status;
            order.updated_at = now;
            order.clone()
        }))
    }
}

/// Fixed prices that also count lookups
#[derive(Default)]
struct PriceList {
    prices: HashMap<Uuid, f64>,
    lookups: Mutex<Vec<Uuid>>,
}

#[async_trait]
impl ProductPrices for PriceList {
    async fn price_of(&self, product_id: Uuid) -> OrderResult<Option<f64>> {
        self.lookups.lock().unwrap().push(product_id);
        Ok(self.prices.get(&product_id).copied())
    }
}

const SECRET: &str = "orders-handler-test-secret-0123456789";

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
}

fn token(user_id: Uuid, roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    jwt()
        .create_access_token(&user_id.to_string(), "buyer@store.io", "Buyer", &roles)
        .unwrap()
}

fn clock() -> Clock {
    Arc::new(|| Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap())
}

struct Fixture {
    app: Router,
    repo: InMemoryOrders,
    prices: Arc<PriceList>,
    p1: Uuid,
    p2: Uuid,
}

fn fixture() -> Fixture {
    let (p1, p2) = (Uuid::now_v7(), Uuid::now_v7());
    let prices = Arc::new(PriceList {
        prices: HashMap::from([(p1, 10.0), (p2, 25.0)]),
        lookups: Mutex::new(Vec::new()),
    });
    let repo = InMemoryOrders::default();
    let service = OrderService::new(repo.clone(), prices.clone(), clock());

    let auth = middleware::from_fn_with_state(jwt(), jwt_auth_middleware);
    let app = Router::new()
        .nest("/orders", handlers::router(service.clone()).layer(auth.clone()))
        .nest(
            "/admin/orders",
            handlers::admin_router(service)
                .layer(middleware::from_fn(require_admin))
                .layer(auth),
        );

    Fixture {
        app,
        repo,
        prices,
        p1,
        p2,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_checkout_prices_order() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);

    let body = json!({ "items": [
        { "product_id": f.p1, "quantity": 2 },
        { "product_id": f.p2, "quantity": 1 }
    ]});
    let (status, order) = send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["items"][0]["unit_price"], 10.0);
    assert_eq!(order["items"][0]["line_total"], 20.0);
    assert_eq!(order["items"][1]["line_total"], 25.0);
    assert_eq!(order["total_price"], 45.0);
    assert_eq!(order["created_at"], "2024-06-01T09:30:00Z");
}

#[tokio::test]
async fn test_checkout_rejects_bad_items() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);

    for body in [
        json!({ "items": [] }),
        json!({ "items": [{ "product_id": "", "quantity": 1 }] }),
        json!({ "items": [{ "product_id": f.p1, "quantity": 0 }] }),
    ] {
        let (status, err) = send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "BAD_REQUEST");
    }
    assert!(f.repo.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_orders_require_token() {
    let f = fixture();
    let response = f
        .app
        .clone()
        .oneshot(Request::get("/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_see_only_their_orders() {
    let f = fixture();
    let (alice, bob) = (Uuid::now_v7(), Uuid::now_v7());
    let (alice_token, bob_token) = (token(alice, &["user"]), token(bob, &["user"]));

    let body = json!({ "items": [{ "product_id": f.p1, "quantity": 1 }] });
    let (_, alice_order) = send(
        &f.app,
        request("POST", "/orders", &alice_token, Some(body.clone())),
    )
    .await;
    send(&f.app, request("POST", "/orders", &bob_token, Some(body))).await;

    let (status, page) = send(&f.app, request("GET", "/orders", &alice_token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["user_id"], alice.to_string());

    let uri = format!("/orders/{}", alice_order["id"].as_str().unwrap());
    let (status, _) = send(&f.app, request("GET", &uri, &bob_token, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let admin = token(Uuid::now_v7(), &[ADMIN_ROLE]);
    let (status, page) = send(&f.app, request("GET", "/orders", &admin, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
}

#[tokio::test]
async fn test_list_looks_up_each_product_once() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);
    let body = json!({ "items": [
        { "product_id": f.p1, "quantity": 1 },
        { "product_id": f.p1, "quantity": 3 },
        { "product_id": f.p2, "quantity": 1 }
    ]});
    send(&f.app, request("POST", "/orders", &buyer, Some(body.clone()))).await;
    send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;
    f.prices.lookups.lock().unwrap().clear();

    let (status, page) = send(&f.app, request("GET", "/orders", &buyer, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"][0]["total_price"], 65.0);

    let mut lookups = f.prices.lookups.lock().unwrap().clone();
    lookups.sort();
    let mut expected = vec![f.p1, f.p2];
    expected.sort();
    assert_eq!(lookups, expected);
}

#[tokio::test]
async fn test_status_update_is_admin_only() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);
    let body = json!({ "items": [{ "product_id": f.p2, "quantity": 1 }] });
    let (_, order) = send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;
    let uri = format!("/admin/orders/{}/status", order["id"].as_str().unwrap());

    let (status, _) = send(
        &f.app,
        request("PUT", &uri, &buyer, Some(json!({ "status": "shipped" }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = token(Uuid::now_v7(), &[ADMIN_ROLE]);
    let (status, _) = send(
        &f.app,
        request("PUT", &uri, &admin, Some(json!({ "status": "returned" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &f.app,
        request("PUT", &uri, &admin, Some(json!({ "status": "shipped" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");
}

#[tokio::test]
async fn test_admin_find_order() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);
    let body = json!({ "items": [{ "product_id": f.p1, "quantity": 4 }] });
    let (_, order) = send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;
    let admin = token(Uuid::now_v7(), &[ADMIN_ROLE]);

    let (status, found) = send(
        &f.app,
        request(
            "POST",
            "/admin/orders/find",
            &admin,
            Some(json!({ "order_id": order["id"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["total_price"], 40.0);

    let (status, _) = send(
        &f.app,
        request(
            "POST",
            "/admin/orders/find",
            &admin,
            Some(json!({ "order_id": "nope" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_with_deleted_product_is_rejected_on_read() {
    let f = fixture();
    let buyer_id = Uuid::now_v7();
    let now = Utc::now();
    let order = Order {
        id: Uuid::now_v7(),
        user_id: buyer_id,
        items: vec![OrderItem {
            product_id: Uuid::now_v7(),
            quantity: 1,
        }],
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    let uri = format!("/orders/{}", order.id);
    f.repo.orders.lock().unwrap().push(order);

    let (status, _) = send(&f.app, request("GET", &uri, &token(buyer_id, &["user"]), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_with_unknown_product_stores_nothing() {
    let f = fixture();
    let buyer = token(Uuid::now_v7(), &["user"]);
    let body = json!({ "items": [
        { "product_id": f.p1, "quantity": 1 },
        { "product_id": Uuid::now_v7(), "quantity": 1 }
    ]});

    let (status, _) = send(&f.app, request("POST", "/orders", &buyer, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(f.repo.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_update_on_unpriceable_order_keeps_status() {
    let f = fixture();
    let now = Utc::now();
    let order = Order {
        id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        items: vec![OrderItem {
            product_id: Uuid::now_v7(),
            quantity: 1,
        }],
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    let uri = format!("/admin/orders/{}/status", order.id);
    f.repo.orders.lock().unwrap().push(order);

    let admin = token(Uuid::now_v7(), &[ADMIN_ROLE]);
    let (status, _) = send(
        &f.app,
        request("PUT", &uri, &admin, Some(json!({ "status": "shipped" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let orders = f.repo.orders.lock().unwrap();
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert_eq!(orders[0].updated_at, now);
}
