//! Blog, landing sections, company info and address lookup

mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_blog_publish_flow() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, draft) = app
        .post(
            "/api/admin/blogs",
            Some(&admin),
            json!({"title": "Cách pha trà Ô Long", "content": "Nước 90 độ...", "tags": ["Oolong", "pha chế", "oolong"]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{draft}");
    assert_eq!(draft["slug"], "cach-pha-tra-o-long");
    assert_eq!(draft["tags"], "oolong,pha chế");
    assert_eq!(draft["is_published"], false);
    let id = draft["id"].as_i64().unwrap();

    let (_, public) = app.get("/api/blogs", None).await;
    assert_eq!(public["total"], 0);
    let (status, body) = app.get("/api/blogs/cach-pha-tra-o-long", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 8001);

    let (status, published) = app
        .put(&format!("/api/admin/blogs/{id}"), Some(&admin), json!({"is_published": true}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(published["published_at"].is_i64());
    assert_eq!(published["title"], "Cách pha trà Ô Long");

    let (_, tagged) = app.get("/api/blogs?tag=oolong", None).await;
    assert_eq!(tagged["total"], 1);
    let (_, other_tag) = app.get("/api/blogs?tag=green", None).await;
    assert_eq!(other_tag["total"], 0);

    app.get("/api/blogs/cach-pha-tra-o-long", None).await;
    let (_, viewed) = app.get("/api/blogs/cach-pha-tra-o-long", None).await;
    assert_eq!(viewed["view_count"], 2);
}

#[tokio::test]
async fn test_blog_slug_conflict_and_delete() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let body = json!({"title": "Trà sen Tây Hồ", "content": "...", "is_published": true});

    let (_, first) = app.post("/api/admin/blogs", Some(&admin), body.clone()).await;
    let (status, err) = app.post("/api/admin/blogs", Some(&admin), body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&err), 8002);

    let id = first["id"].as_i64().unwrap();
    let (status, _) = app.delete(&format!("/api/admin/blogs/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/admin/blogs/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_landing_sections() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (_, visible) = app.get("/api/landing", None).await;
    let keys: Vec<&str> = visible.as_array().unwrap().iter().filter_map(|s| s["key"].as_str()).collect();
    assert_eq!(keys, ["hero", "featured", "about"]);

    let (status, _) = app.get("/api/landing/testimonials", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, section) = app
        .put(
            "/api/admin/landing/promo",
            Some(&admin),
            json!({"title": "Khuyến mãi", "content": {"banner": "/img/tet.jpg"}, "sort_order": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{section}");
    assert_eq!(section["content"]["banner"], "/img/tet.jpg");
    assert_eq!(section["is_visible"], true);

    let (status, _) = app
        .put("/api/admin/landing/promo", Some(&admin), json!({"content": "plain string"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put("/api/admin/landing/Bad%20Key", Some(&admin), json!({"content": {}}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, all) = app.get("/api/admin/landing", Some(&admin)).await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (status, _) = app.delete("/api/admin/landing/promo", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.delete("/api/admin/landing/promo", Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 8101);
}

#[tokio::test]
async fn test_company_info() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, info) = app.get("/api/company-info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "Trà Việt");

    let (status, updated) = app
        .put("/api/company-info", Some(&admin), json!({"phone": "0281234567", "email": "shop@traviet.vn"}))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["phone"], "0281234567");
    assert_eq!(updated["name"], "Trà Việt");

    let (status, _) = app.put("/api/company-info", Some(&admin), json!({"email": "not-an-email"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_address_lookup() {
    let app = TestApp::new().await;

    let (status, provinces) = app.get("/api/address/provinces", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(provinces.as_array().unwrap().iter().any(|p| p["code"] == "01"));

    let (_, districts) = app.get("/api/address/provinces/01/districts", None).await;
    assert!(districts.as_array().unwrap().iter().all(|d| d["province_code"] == "01"));
    assert_eq!(districts.as_array().unwrap().len(), 3);

    let (_, wards) = app.get("/api/address/districts/001/wards", None).await;
    assert_eq!(wards.as_array().unwrap().len(), 3);

    let (status, body) = app.get("/api/address/provinces/99/districts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 7101);

    let (status, body) = app.get("/api/address/districts/999/wards", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 7102);
}
