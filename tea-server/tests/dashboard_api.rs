//! Dashboard aggregates over real orders

mod common;

use common::{TestApp, checkout_body};
use http::StatusCode;
use serde_json::{Value, json};

async fn place(app: &TestApp, sku: i64, quantity: i64) -> Value {
    let (status, order) = app
        .post(
            "/api/orders",
            None,
            checkout_body(Some(json!([{"sku_id": sku, "quantity": quantity}])), None),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    order
}

#[tokio::test]
async fn test_summary_ignores_cancelled_orders() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, sku) = app.create_product(&admin, "DB-1", 100_000.0, 50).await;

    place(&app, sku, 2).await;
    place(&app, sku, 1).await;
    let cancelled = place(&app, sku, 5).await;
    let id = cancelled["id"].as_i64().unwrap();
    app.put(&format!("/api/orders/{id}/status"), Some(&admin), json!({"status": "cancelled"}))
        .await;

    let (status, summary) = app.get("/api/dashboard/summary?period=week", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK, "{summary}");
    assert_eq!(summary["period"], "week");
    assert_eq!(summary["orders"]["current"], 2.0);
    assert_eq!(summary["revenue"]["current"], 300_000.0);
    assert_eq!(summary["products_sold"]["current"], 3.0);
    assert_eq!(summary["orders"]["previous"], 0.0);
    assert_eq!(summary["orders"]["growth"], 100.0);
}

#[tokio::test]
async fn test_status_breakdown_lists_every_status() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, sku) = app.create_product(&admin, "DB-2", 50_000.0, 10).await;
    place(&app, sku, 1).await;

    let (status, counts) = app.get("/api/dashboard/order-status", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let counts = counts.as_array().unwrap();
    assert_eq!(counts.len(), 5);
    let pending = counts.iter().find(|c| c["status"] == "pending").unwrap();
    assert_eq!(pending["count"], 1);
    let delivered = counts.iter().find(|c| c["status"] == "delivered").unwrap();
    assert_eq!(delivered["count"], 0);
}

#[tokio::test]
async fn test_chart_top_products_and_recent_orders() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, popular) = app.create_product(&admin, "HOT", 40_000.0, 100).await;
    let (_, niche) = app.create_product(&admin, "NICHE", 400_000.0, 100).await;
    place(&app, popular, 6).await;
    place(&app, niche, 1).await;

    let (status, chart) = app.get("/api/dashboard/revenue-chart?period=week", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let points = chart.as_array().unwrap();
    assert!(points.len() >= 7);
    let revenue: f64 = points.iter().filter_map(|p| p["revenue"].as_f64()).sum();
    assert_eq!(revenue, 640_000.0);

    let (_, top) = app.get("/api/dashboard/top-products?limit=1", Some(&admin)).await;
    let top = top.as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["product_name"], "Trà HOT");
    assert_eq!(top[0]["quantity_sold"], 6);

    let (_, recent) = app.get("/api/dashboard/recent-orders?limit=5", Some(&admin)).await;
    assert_eq!(recent.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_requires_permission() {
    let app = TestApp::new().await;
    let customer = app.customer_token("dash@tea.test").await;
    let (status, _) = app.get("/api/dashboard/summary", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/dashboard/summary", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_top_products_keep_sales_of_removed_products() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (product_id, sku) = app.create_product(&admin, "GONE", 40_000.0, 20).await;
    place(&app, sku, 4).await;

    sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(product_id)
        .execute(&app.state.pool)
        .await
        .unwrap();

    let (status, top) = app.get("/api/dashboard/top-products", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK, "{top}");
    let top = top.as_array().unwrap();
    assert_eq!(top.len(), 1);
    assert!(top[0]["product_id"].is_null());
    assert_eq!(top[0]["product_name"], "Trà GONE");
    assert_eq!(top[0]["quantity_sold"], 4);
    assert_eq!(top[0]["revenue"], 160_000.0);
}
