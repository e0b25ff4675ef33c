//! Registration, login, sessions and account administration

mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_then_me() {
    let app = TestApp::new().await;
    let token = app.customer_token("Lan@Tea.Test").await;

    let (status, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "lan@tea.test");
    assert_eq!(me["role"], "customer");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = TestApp::new().await;
    app.customer_token("dup@tea.test").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"email": "DUP@tea.test", "password": "another-pass", "full_name": "Dup"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 1006);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({"email": "short@tea.test", "password": "123", "full_name": "Short"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 1007);
}

#[tokio::test]
async fn test_bad_credentials_look_the_same() {
    let app = TestApp::new().await;
    app.customer_token("mai@tea.test").await;

    let (status, wrong_password) = app
        .post("/api/auth/login", None, json!({"email": "mai@tea.test", "password": "nope-nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .post("/api/auth/login", None, json!({"email": "ghost@tea.test", "password": "nope-nope"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&wrong_password), error_code(&unknown));
    assert_eq!(error_code(&unknown), 1002);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let token = app.customer_token("hoa@tea.test").await;

    let (status, _) = app
        .put(
            "/api/auth/password",
            Some(&token),
            json!({"current_password": "wrong-pass", "new_password": "new-secret"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, ok) = app
        .put(
            "/api/auth/password",
            Some(&token),
            json!({"current_password": "secret-pass", "new_password": "new-secret"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ok, json!(true));

    app.login("hoa@tea.test", "new-secret").await;
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1001);

    let (status, _) = app.get("/api/cart", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_cannot_reach_admin_routes() {
    let app = TestApp::new().await;
    let token = app.customer_token("cus@tea.test").await;

    let (status, _) = app.get("/api/admin/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post("/api/categories", Some(&token), json!({"name": "Hack"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_disables_customer() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("off@tea.test").await;
    let (_, me) = app.get("/api/auth/me", Some(&customer)).await;
    let id = me["id"].as_i64().unwrap();

    let (status, user) = app
        .put(&format!("/api/admin/users/{id}"), Some(&admin), json!({"is_active": false}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["is_active"], false);

    let (status, body) = app
        .post("/api/auth/login", None, json!({"email": "off@tea.test", "password": "secret-pass"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 1005);

    // a token issued before the change stops working
    let (status, body) = app.get("/api/cart", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 1005);

    // public routes still answer, as an anonymous visitor
    let (status, _) = app.get("/api/products", Some(&customer)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_change_applies_to_issued_token() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let customer = app.customer_token("clerk@tea.test").await;
    let (_, me) = app.get("/api/auth/me", Some(&customer)).await;
    let id = me["id"].as_i64().unwrap();

    let (status, _) = app.get("/api/orders", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&format!("/api/admin/users/{id}"), Some(&admin), json!({"role": "staff"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/orders", Some(&customer)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .put(&format!("/api/admin/users/{id}"), Some(&admin), json!({"role": "customer"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/orders", Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_demote_self() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (_, me) = app.get("/api/auth/me", Some(&admin)).await;
    let id = me["id"].as_i64().unwrap();

    let (status, body) = app
        .put(&format!("/api/admin/users/{id}"), Some(&admin), json!({"role": "customer"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 2003);
}

#[tokio::test]
async fn test_admin_lists_users_with_filter() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.customer_token("a1@tea.test").await;
    app.customer_token("a2@tea.test").await;

    let (status, page) = app.get("/api/admin/users?role=customer&page_size=1", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
}
