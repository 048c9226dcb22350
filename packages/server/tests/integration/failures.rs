use std::sync::Arc;

use serde_json::json;

use crate::common::faults::{FaultyTables, UndeletableStorage, UnreachableIdentity};
use crate::common::{BackendParts, TestApp, routes};

fn with_tables(tables: FaultyTables) -> BackendParts {
    BackendParts {
        tables: Some(Arc::new(tables)),
        ..Default::default()
    }
}

#[tokio::test]
async fn identity_outage_at_the_auth_gate_is_500() {
    let app = TestApp::spawn_with(BackendParts {
        identity: Some(Arc::new(UnreachableIdentity::default())),
        ..Default::default()
    })
    .await;
    let token = app.admin_token().await;

    let res = app.get_with_token(routes::USERS, &token).await;

    assert_eq!(res.status, 500, "{}", res.text);
    assert_eq!(res.message(), "Terjadi kesalahan pada server");
    assert_eq!(res.body["status"], false);
}

#[tokio::test]
async fn failed_list_read_is_500_with_the_upstream_message() {
    let app = TestApp::spawn_with(with_tables(FaultyTables::failing_list((
        503,
        "upstream down",
    ))))
    .await;

    let res = app.get(routes::BUMBU).await;

    assert_eq!(res.status, 500, "{}", res.text);
    assert_eq!(res.message(), "upstream down");
    assert_eq!(res.body["statusCode"], 500);
}

#[tokio::test]
async fn failed_lookup_is_500_unless_the_id_is_rejected() {
    let app = TestApp::spawn_with(with_tables(FaultyTables::failing_lookup((
        503,
        "upstream down",
    ))))
    .await;

    let res = app.get(&routes::bumbu("1")).await;

    assert_eq!(res.status, 500, "{}", res.text);
    assert_eq!(res.message(), "upstream down");
}

#[tokio::test]
async fn id_the_table_cannot_cast_is_404() {
    let app = TestApp::spawn_with(with_tables(FaultyTables::failing_lookup((
        400,
        "invalid input syntax for type bigint: \"abc\"",
    ))))
    .await;
    let token = app.admin_token().await;

    let res = app.get(&routes::bumbu("abc")).await;
    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.message(), "Bumbu tidak ditemukan");

    let res = app.get(&routes::potong("abc")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.message(), "Potong tidak ditemukan");

    let res = app.delete(&routes::bumbu("abc"), Some(&token)).await;
    assert_eq!(res.status, 404);

    let res = app
        .put_json(&routes::user("abc"), &json!({"username": "x"}), &token)
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.message(), "User tidak ditemukan");
}

#[tokio::test]
async fn rejected_insert_is_400_with_the_upstream_message() {
    let app = TestApp::spawn_with(with_tables(FaultyTables::failing_insert((
        409,
        "duplicate key value violates unique constraint \"users_email_key\"",
    ))))
    .await;
    let token = app.admin_token().await;

    let body = json!({
        "username": "budi",
        "email": "budi@example.com",
        "password": "rahasia"
    });
    let res = app.post_json(routes::USERS, &body, Some(&token)).await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(
        res.message(),
        "duplicate key value violates unique constraint \"users_email_key\""
    );
}

#[tokio::test]
async fn failed_image_delete_is_500_and_keeps_the_row() {
    let app = TestApp::spawn_with(BackendParts {
        storage: Some(Arc::new(UndeletableStorage {
            base_url: "http://blob.test/uploads".into(),
        })),
        ..Default::default()
    })
    .await;
    let token = app.admin_token().await;
    let created = app.create_bumbu(&token, "Rendang").await;
    let id = created.id_at("/newBumbu/id");

    let res = app.delete(&routes::bumbu(&id), Some(&token)).await;

    assert_eq!(res.status, 500, "{}", res.text);
    assert_eq!(
        res.message(),
        "Gagal menghapus gambar dari storage: storage unavailable"
    );
    assert_eq!(app.get(&routes::bumbu(&id)).await.status, 200);
}
