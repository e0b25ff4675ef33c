//! In-process test harness: the full app over an in-memory database
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tea_server::{Config, ServerState, build_app};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@tea.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config::for_tests();
        let state = ServerState::initialize(&config).await.expect("server state");
        let router = build_app(&state).with_state(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("infallible");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, token, None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/api/auth/login", None, json!({"email": email, "password": password}))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Register a customer and return its token
    pub async fn customer_token(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({"email": email, "password": "secret-pass", "full_name": "Khách Hàng"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn create_category(&self, admin: &str, name: &str) -> i64 {
        let (status, body) = self.post("/api/categories", Some(admin), json!({"name": name})).await;
        assert_eq!(status, StatusCode::OK, "category: {body}");
        body["id"].as_i64().expect("category id")
    }

    /// One product with one SKU; returns `(product_id, sku_id)`
    pub async fn create_product(&self, admin: &str, code: &str, price: f64, stock: i64) -> (i64, i64) {
        let category_id = self.create_category(admin, &format!("Danh mục {code}")).await;
        let (status, body) = self
            .post(
                "/api/products",
                Some(admin),
                json!({
                    "category_id": category_id,
                    "name": format!("Trà {code}"),
                    "skus": [{"name": "100g", "sku_code": code, "price": price, "stock": stock}],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "product: {body}");
        let product_id = body["id"].as_i64().expect("product id");
        let sku_id = body["skus"][0]["id"].as_i64().expect("sku id");
        (product_id, sku_id)
    }

    pub async fn create_ship_config(&self, admin: &str, threshold: f64, fee: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/ship",
                Some(admin),
                json!({"name": "Tiêu chuẩn", "free_ship_threshold": threshold, "flat_fee": fee, "is_active": true}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "ship config: {body}");
        body["id"].as_i64().expect("ship id")
    }

    pub async fn sku_stock(&self, sku_id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT stock FROM sku WHERE id = ?")
            .bind(sku_id)
            .fetch_one(&self.state.pool)
            .await
            .expect("stock")
    }
}

/// Checkout body shipping to a seeded Hà Nội address
pub fn checkout_body(items: Option<Value>, discount_code: Option<&str>) -> Value {
    let mut body = json!({
        "customer_name": "Nguyễn Văn An",
        "customer_phone": "0912345678",
        "province_code": "01",
        "district_code": "001",
        "ward_code": "00001",
        "street": "12 Phúc Xá",
        "payment_method": "cod",
    });
    if let Some(items) = items {
        body["items"] = items;
    }
    if let Some(code) = discount_code {
        body["discount_code"] = json!(code);
    }
    body
}

pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
