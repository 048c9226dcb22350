use crate::common::{TestApp, routes};

#[tokio::test]
async fn health_reports_the_server_is_running() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["message"], "Server is running");
}

#[tokio::test]
async fn openapi_document_describes_the_api_routes() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths object");
    for path in [
        "/health",
        "/api/auth/signin",
        "/api/bumbu",
        "/api/bumbu/{id}",
        "/api/potong/{id}",
        "/api/content/{key}",
        "/api/users",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let app = TestApp::spawn().await;
    let res = app.get("/api/daging").await;
    assert_eq!(res.status, 404);
}
