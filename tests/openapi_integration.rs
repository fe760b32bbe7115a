use axum::http::StatusCode;

mod support;

use support::{TestApp, read_json};

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let (status, doc) = read_json(app.get("/openapi.json").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Newsdesk API");
    assert!(doc["paths"]["/api/v1/articles/search"].is_object());
    assert!(doc["paths"]["/api/v1/channels/facebook/stories"]["post"].is_object());
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = read_json(app.get("/health").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
