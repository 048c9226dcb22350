use serde_json::json;

use crate::common::{TestApp, routes};

fn budi() -> serde_json::Value {
    json!({
        "username": "budi",
        "email": "budi@example.com",
        "password": "rahasia"
    })
}

#[tokio::test]
async fn every_user_route_requires_a_token() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get(routes::USERS).await.status, 401);
    assert_eq!(app.get(&routes::user("1")).await.status, 401);
    assert_eq!(app.post_json(routes::USERS, &budi(), None).await.status, 401);
    assert_eq!(app.delete(&routes::user("1"), None).await.status, 401);
}

#[tokio::test]
async fn create_defaults_the_role_and_hides_the_password() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app.post_json(routes::USERS, &budi(), Some(&token)).await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.message(), "User created successfully");
    assert_eq!(res.body["user"]["username"], "budi");
    assert_eq!(res.body["user"]["role"], "user");
    assert!(res.body["user"].get("password").is_none());
}

#[tokio::test]
async fn create_validates_the_body() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let mut body = budi();
    body["email"] = json!("bukan-email");
    let res = app.post_json(routes::USERS, &body, Some(&token)).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.message(), "Email tidak valid");

    let mut body = budi();
    body["role"] = json!("superuser");
    let res = app.post_json(routes::USERS, &body, Some(&token)).await;
    assert_eq!(res.status, 400);
    assert!(res.message().starts_with("Body tidak valid"));
}

#[tokio::test]
async fn list_get_update_delete_round() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app
        .post_json(routes::USERS, &budi(), Some(&token))
        .await
        .id_at("/user/id");

    let list = app.get_with_token(routes::USERS, &token).await;
    assert_eq!(list.status, 200);
    assert_eq!(list.body["users"].as_array().unwrap().len(), 1);

    let one = app.get_with_token(&routes::user(&id), &token).await;
    assert_eq!(one.status, 200);
    assert_eq!(one.body["user"]["email"], "budi@example.com");

    let updated = app
        .put_json(&routes::user(&id), &json!({"role": "admin"}), &token)
        .await;
    assert_eq!(updated.status, 200, "{}", updated.text);
    assert_eq!(updated.body["user"]["role"], "admin");
    assert_eq!(updated.body["user"]["username"], "budi");

    let deleted = app.delete(&routes::user(&id), Some(&token)).await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.message(), "User deleted successfully");

    let gone = app.get_with_token(&routes::user(&id), &token).await;
    assert_eq!(gone.status, 404);
    assert_eq!(gone.message(), "User tidak ditemukan");
}

#[tokio::test]
async fn update_of_unknown_id_is_404() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .put_json(&routes::user("404"), &json!({"username": "x"}), &token)
        .await;

    assert_eq!(res.status, 404);
}
