//! Cart, checkout and the order lifecycle

mod common;

use common::{TestApp, checkout_body, error_code};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_cart_merges_and_totals() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("cart@tea.test").await;
    let (_, sku) = app.create_product(&admin, "C-1", 120_000.0, 20).await;

    app.post("/api/cart/items", Some(&customer), json!({"sku_id": sku, "quantity": 2})).await;
    let (status, cart) = app
        .post("/api/cart/items", Some(&customer), json!({"sku_id": sku, "quantity": 3}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["item_count"], 5);
    assert_eq!(cart["subtotal"], 600_000.0);

    let (_, cart) = app
        .put(&format!("/api/cart/items/{sku}"), Some(&customer), json!({"quantity": 1}))
        .await;
    assert_eq!(cart["subtotal"], 120_000.0);

    let (status, cart) = app.delete(&format!("/api/cart/items/{sku}"), Some(&customer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 0);

    let (status, body) = app.delete(&format!("/api/cart/items/{sku}"), Some(&customer)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 3001);
}

#[tokio::test]
async fn test_cart_rejects_bad_quantities() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("qty@tea.test").await;
    let (_, sku) = app.create_product(&admin, "Q-1", 50_000.0, 2).await;

    let (status, body) = app
        .post("/api/cart/items", Some(&customer), json!({"sku_id": sku, "quantity": 0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 3003);

    let (status, body) = app
        .post("/api/cart/items", Some(&customer), json!({"sku_id": sku, "quantity": 3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 4006);

    let (status, _) = app
        .post("/api/cart/items", Some(&customer), json!({"sku_id": 424242, "quantity": 1}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_checkout_totals_and_stock() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_ship_config(&admin, 500_000.0, 30_000.0).await;
    let (_, sku) = app.create_product(&admin, "G-1", 120_000.0, 10).await;

    let (status, order) = app
        .post(
            "/api/orders",
            None,
            checkout_body(Some(json!([{"sku_id": sku, "quantity": 2}])), None),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"], 240_000.0);
    assert_eq!(order["shipping_fee"], 30_000.0);
    assert_eq!(order["total"], 270_000.0);
    assert_eq!(order["ward_name"], "Phường Phúc Xá");
    assert_eq!(order["items"][0]["product_name"], "Trà G-1");
    assert!(order["user_id"].is_null());
    assert_eq!(app.sku_stock(sku).await, 8);

    let code = order["code"].as_str().unwrap();
    let (status, tracked) = app
        .get(&format!("/api/orders/track?code={code}&phone=0912345678"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracked["id"], order["id"]);

    let (status, _) = app
        .get(&format!("/api/orders/track?code={code}&phone=0999999999"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_free_shipping_over_threshold() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_ship_config(&admin, 500_000.0, 30_000.0).await;
    let (_, sku) = app.create_product(&admin, "F-1", 250_000.0, 5).await;

    let (status, preview) = app
        .post("/api/orders/preview", None, json!({"items": [{"sku_id": sku, "quantity": 2}]}))
        .await;
    assert_eq!(status, StatusCode::OK, "{preview}");
    assert_eq!(preview["subtotal"], 500_000.0);
    assert_eq!(preview["shipping"]["shipping_fee"], 0.0);
    assert_eq!(preview["shipping"]["is_free"], true);
    assert_eq!(preview["total"], 500_000.0);
    assert_eq!(app.sku_stock(sku).await, 5);
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, plenty) = app.create_product(&admin, "S-1", 100_000.0, 10).await;
    let (_, scarce) = app.create_product(&admin, "S-2", 100_000.0, 1).await;

    let (status, body) = app
        .post(
            "/api/orders",
            None,
            checkout_body(
                Some(json!([{"sku_id": plenty, "quantity": 3}, {"sku_id": scarce, "quantity": 2}])),
                None,
            ),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 4006);
    assert_eq!(app.sku_stock(plenty).await, 10);
    assert_eq!(app.sku_stock(scarce).await, 1);
}

#[tokio::test]
async fn test_address_must_nest() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, sku) = app.create_product(&admin, "A-1", 100_000.0, 3).await;

    let mut body = checkout_body(Some(json!([{"sku_id": sku, "quantity": 1}])), None);
    body["district_code"] = json!("164");
    let (status, err) = app.post("/api/orders", None, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&err), 7104);
}

#[tokio::test]
async fn test_cart_checkout_clears_cart() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("buyer@tea.test").await;
    let (_, sku) = app.create_product(&admin, "CC-1", 90_000.0, 5).await;

    let (status, body) = app.post("/api/orders", Some(&customer), checkout_body(None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 3002);

    app.post("/api/cart/items", Some(&customer), json!({"sku_id": sku, "quantity": 2})).await;
    let (status, order) = app.post("/api/orders", Some(&customer), checkout_body(None, None)).await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["subtotal"], 180_000.0);
    assert!(order["user_id"].is_i64());

    let (_, cart) = app.get("/api/cart", Some(&customer)).await;
    assert_eq!(cart["item_count"], 0);

    let (_, mine) = app.get("/api/orders/mine", Some(&customer)).await;
    assert_eq!(mine["total"], 1);
}

#[tokio::test]
async fn test_customer_cancel_restores_stock() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("cancel@tea.test").await;
    let other = app.customer_token("other@tea.test").await;
    let (_, sku) = app.create_product(&admin, "X-1", 70_000.0, 4).await;

    let (_, order) = app
        .post(
            "/api/orders",
            Some(&customer),
            checkout_body(Some(json!([{"sku_id": sku, "quantity": 3}])), None),
        )
        .await;
    let id = order["id"].as_i64().unwrap();
    assert_eq!(app.sku_stock(sku).await, 1);

    let (status, _) = app.post(&format!("/api/orders/{id}/cancel"), Some(&other), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, cancelled) = app.post(&format!("/api/orders/{id}/cancel"), Some(&customer), json!({})).await;
    assert_eq!(status, StatusCode::OK, "{cancelled}");
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(app.sku_stock(sku).await, 4);

    let (status, body) = app.post(&format!("/api/orders/{id}/cancel"), Some(&customer), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 4004);
}

#[tokio::test]
async fn test_status_machine() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, sku) = app.create_product(&admin, "M-1", 60_000.0, 4).await;
    let (_, order) = app
        .post("/api/orders", None, checkout_body(Some(json!([{"sku_id": sku, "quantity": 1}])), None))
        .await;
    let id = order["id"].as_i64().unwrap();
    let status_url = format!("/api/orders/{id}/status");

    let (status, body) = app.put(&status_url, Some(&admin), json!({"status": "delivered"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 4003);

    for next in ["confirmed", "shipping", "delivered"] {
        let (status, updated) = app.put(&status_url, Some(&admin), json!({"status": next})).await;
        assert_eq!(status, StatusCode::OK, "{updated}");
        assert_eq!(updated["status"], next);
    }

    let (status, _) = app.put(&status_url, Some(&admin), json!({"status": "cancelled"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.sku_stock(sku).await, 3);

    let (_, list) = app.get("/api/orders?status=delivered", Some(&admin)).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_customer_cannot_manage_orders() {
    let app = TestApp::new().await;
    let customer = app.customer_token("nosy@tea.test").await;
    let (status, _) = app.get("/api/orders", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/orders/mine", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
