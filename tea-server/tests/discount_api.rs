//! Discount codes: admin CRUD, application and usage accounting

mod common;

use common::{TestApp, checkout_body, error_code};
use http::StatusCode;
use serde_json::{Value, json};

const HOUR: i64 = 60 * 60 * 1000;

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn discount(code: &str, extra: Value) -> Value {
    let mut body = json!({
        "code": code,
        "discount_type": "percentage",
        "value": 10,
        "start_date": now() - HOUR,
        "end_date": now() + 24 * HOUR,
    });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    body
}

async fn create(app: &TestApp, admin: &str, body: Value) -> Value {
    let (status, created) = app.post("/api/discounts", Some(admin), body).await;
    assert_eq!(status, StatusCode::OK, "{created}");
    created
}

#[tokio::test]
async fn test_apply_percentage_with_cap() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(&app, &admin, discount("TRA10", json!({"max_discount_amount": 20000}))).await;

    let (status, applied) = app
        .post("/api/discounts/apply", None, json!({"code": "TRA10", "order_value": 150000}))
        .await;
    assert_eq!(status, StatusCode::OK, "{applied}");
    assert_eq!(applied["discount_amount"], 15000.0);
    assert_eq!(applied["final_amount"], 135000.0);

    let (_, capped) = app
        .post("/api/discounts/apply", None, json!({"code": "TRA10", "order_value": 500000}))
        .await;
    assert_eq!(capped["discount_amount"], 20000.0);
}

#[tokio::test]
async fn test_fixed_discount_never_exceeds_order() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(&app, &admin, discount("GIAM50K", json!({"discount_type": "fixed", "value": 50000}))).await;

    let (_, applied) = app
        .post("/api/discounts/apply", None, json!({"code": "GIAM50K", "order_value": 30000}))
        .await;
    assert_eq!(applied["discount_amount"], 30000.0);
    assert_eq!(applied["final_amount"], 0.0);
}

#[tokio::test]
async fn test_invalid_date_range() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let start = now();
    let (status, body) = app
        .post(
            "/api/discounts",
            Some(&admin),
            discount("BAD", json!({"start_date": start, "end_date": start})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5009);
}

#[tokio::test]
async fn test_eligibility_errors() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(
        &app,
        &admin,
        discount("OLD", json!({"start_date": now() - 48 * HOUR, "end_date": now() - 24 * HOUR})),
    )
    .await;
    create(&app, &admin, discount("FUTURE", json!({"start_date": now() + HOUR, "end_date": now() + 2 * HOUR}))).await;
    create(&app, &admin, discount("MIN", json!({"min_order_value": 300000}))).await;
    create(&app, &admin, discount("OFF", json!({"is_active": false}))).await;

    let cases = [("OLD", 5005), ("FUTURE", 5004), ("MIN", 5007), ("OFF", 5003)];
    for (code, expected) in cases {
        let (status, body) = app
            .post("/api/discounts/apply", None, json!({"code": code, "order_value": 100000}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(error_code(&body), expected, "{code}");
    }

    let (status, body) = app
        .post("/api/discounts/apply", None, json!({"code": "NOPE", "order_value": 100000}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 5001);
}

#[tokio::test]
async fn test_checkout_with_discount_and_usage_limit() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_ship_config(&admin, 500_000.0, 30_000.0).await;
    let (_, sku) = app.create_product(&admin, "D-1", 120_000.0, 10).await;
    let created = create(&app, &admin, discount("ONCE", json!({"usage_limit": 1}))).await;
    let id = created["id"].as_i64().unwrap();
    let items = json!([{"sku_id": sku, "quantity": 2}]);

    let (status, order) = app
        .post("/api/orders", None, checkout_body(Some(items.clone()), Some("ONCE")))
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["discount_amount"], 24000.0);
    assert_eq!(order["total"], 246000.0);
    assert_eq!(order["discount_code"], "ONCE");

    let (status, body) = app
        .post("/api/orders", None, checkout_body(Some(items.clone()), Some("ONCE")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5006);
    assert_eq!(app.sku_stock(sku).await, 8);

    // Cancelling hands the use back
    let order_id = order["id"].as_i64().unwrap();
    let (status, _) = app
        .put(&format!("/api/orders/{order_id}/status"), Some(&admin), json!({"status": "cancelled"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, discount) = app.get(&format!("/api/discounts/{id}"), Some(&admin)).await;
    assert_eq!(discount["used_count"], 0);

    let (status, _) = app
        .post("/api/orders", None, checkout_body(Some(items), Some("ONCE")))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_per_user_limit() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("loyal@tea.test").await;
    let (_, sku) = app.create_product(&admin, "U-1", 100_000.0, 10).await;
    create(&app, &admin, discount("MOTLAN", json!({"per_user_limit": 1}))).await;
    let items = json!([{"sku_id": sku, "quantity": 1}]);

    let (status, _) = app
        .post("/api/orders", Some(&customer), checkout_body(Some(items.clone()), Some("MOTLAN")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/api/discounts/apply", Some(&customer), json!({"code": "MOTLAN", "order_value": 100000}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5008);

    let other = app.customer_token("new@tea.test").await;
    let (status, _) = app
        .post("/api/orders", Some(&other), checkout_body(Some(items), Some("MOTLAN")))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_code_and_admin_only() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(&app, &admin, discount("SAME", json!({}))).await;

    let (status, body) = app.post("/api/discounts", Some(&admin), discount("SAME", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 5002);

    let customer = app.customer_token("peek@tea.test").await;
    let (status, _) = app.get("/api/discounts", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_oversized_order_value_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(&app, &admin, discount("BIG10", json!({"value": 50}))).await;

    let (status, body) = app
        .post("/api/discounts/apply", None, json!({"code": "BIG10", "order_value": 7.0e28}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 8);
    assert_eq!(body["details"]["field"], "order_value");

    let (status, body) = app
        .post("/api/discounts", Some(&admin), discount("HUGE1", json!({"discount_type": "fixed", "value": 1e20})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 8);
}

#[tokio::test]
async fn test_malformed_input_uses_error_body() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post("/api/discounts", Some(&admin), discount("BOGUS1", json!({"discount_type": "bogus"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 6);
    assert!(body["message"].as_str().unwrap().contains("bogus"));

    let mut missing = discount("NOEND1", json!({}));
    missing.as_object_mut().unwrap().remove("end_date");
    let (status, body) = app.post("/api/discounts", Some(&admin), missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 7);

    let (status, body) = app.get("/api/discounts?page=abc", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5);

    let (status, body) = app.get("/api/discounts/not-a-number", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5);
}

#[tokio::test]
async fn test_search_matches_underscore_literally() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    create(&app, &admin, discount("TET_2025", json!({}))).await;
    create(&app, &admin, discount("TETX2025", json!({}))).await;

    let (status, page) = app.get("/api/discounts?q=TET_2025", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["code"], "TET_2025");
}
