//! Categories, products and SKUs

mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_category_slug_and_duplicate_name() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, cat) = app.post("/api/categories", Some(&admin), json!({"name": "Trà Ô Long"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cat["slug"], "tra-o-long");

    let (status, body) = app.post("/api/categories", Some(&admin), json!({"name": "Trà Ô Long"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 6103);
}

#[tokio::test]
async fn test_inactive_category_hidden_from_public() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.create_category(&admin, "Trà Shan Tuyết").await;

    let (status, _) = app
        .put(&format!("/api/categories/{id}"), Some(&admin), json!({"is_active": false}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, public) = app.get("/api/categories", None).await;
    assert!(public.as_array().unwrap().iter().all(|c| c["id"] != id));

    let (status, _) = app.get(&format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = app.get("/api/categories?include_inactive=true", Some(&admin)).await;
    assert!(all.as_array().unwrap().iter().any(|c| c["id"] == id));
}

#[tokio::test]
async fn test_category_with_products_cannot_be_deleted() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (product_id, _) = app.create_product(&admin, "TX-01", 150_000.0, 5).await;
    let (_, product) = app.get(&format!("/api/products/{product_id}"), None).await;
    let category_id = product["category_id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/api/categories/{category_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 6102);
}

#[tokio::test]
async fn test_product_create_and_lookup_by_slug() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category_id = app.create_category(&admin, "Trà xanh").await;

    let (status, product) = app
        .post(
            "/api/products",
            Some(&admin),
            json!({
                "category_id": category_id,
                "name": "Trà Tân Cương",
                "origin": "Thái Nguyên",
                "skus": [
                    {"name": "100g", "sku_code": "TC-100", "price": 120000, "stock": 10},
                    {"name": "500g", "sku_code": "TC-500", "price": 550000, "stock": 3},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{product}");
    assert_eq!(product["slug"], "tra-tan-cuong");
    assert_eq!(product["skus"].as_array().unwrap().len(), 2);

    let (status, by_slug) = app.get("/api/products/slug/tra-tan-cuong", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["id"], product["id"]);
    assert_eq!(by_slug["category_name"], "Trà xanh");
}

#[tokio::test]
async fn test_product_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category_id = app.create_category(&admin, "Trà đen").await;

    let (status, _) = app
        .post(
            "/api/products",
            Some(&admin),
            json!({"category_id": category_id, "name": "Free", "skus": [{"name": "x", "sku_code": "F-1", "price": 0}]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/api/products", Some(&admin), json!({"category_id": 9999, "name": "Orphan"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 6101);
}

#[tokio::test]
async fn test_duplicate_sku_code() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (product_id, _) = app.create_product(&admin, "DUP-1", 90_000.0, 1).await;

    let (status, body) = app
        .post(
            &format!("/api/products/{product_id}/skus"),
            Some(&admin),
            json!({"name": "200g", "sku_code": "DUP-1", "price": 170000}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 6004);
}

#[tokio::test]
async fn test_deleted_product_disappears_from_storefront() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (product_id, _) = app.create_product(&admin, "GONE-1", 80_000.0, 4).await;

    let (status, ok) = app.delete(&format!("/api/products/{product_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ok, json!(true));

    let (status, _) = app.get(&format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, still_there) = app.get(&format!("/api/products/{product_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["is_active"], false);
}

#[tokio::test]
async fn test_product_list_filters_and_paging() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create_product(&admin, "P-1", 100_000.0, 1).await;
    app.create_product(&admin, "P-2", 200_000.0, 1).await;
    app.create_product(&admin, "P-3", 300_000.0, 1).await;

    let (status, page) = app.get("/api/products?page_size=2&page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);

    let (_, found) = app.get("/api/products?q=P-2", None).await;
    assert_eq!(found["total"], 1);
}
