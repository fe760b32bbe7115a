use axum::http::{Method, StatusCode};
use serde_json::json;

mod support;

use support::{
    MultipartForm, RejectingUploader, TestApp, UnconfiguredChannels, article_form,
    assert_error_response, read_json,
};

#[tokio::test]
async fn e2e_upload_image_returns_url_and_public_id() {
    let app = TestApp::new();
    let form = MultipartForm::default().file("file", "photo.jpg", "image/jpeg", b"jpeg bytes");

    let (status, body) = read_json(app.send(form.into_request("/api/v1/uploads/image")).await).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["url"], "https://cdn.example/newsdesk/image-1");
    assert_eq!(body["publicId"], "newsdesk/image-1");
}

#[tokio::test]
async fn e2e_upload_video_rejects_images() {
    let app = TestApp::new();
    let form = MultipartForm::default().file("file", "photo.jpg", "image/jpeg", b"jpeg bytes");

    let resp = app.send(form.into_request("/api/v1/uploads/video")).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    assert_eq!(app.uploader.count(), 0);
}

#[tokio::test]
async fn e2e_upload_without_file_returns_400() {
    let app = TestApp::new();
    let form = MultipartForm::default().text("note", "nothing attached");

    let resp = app.send(form.into_request("/api/v1/uploads/image")).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn e2e_failed_upload_aborts_article_creation() {
    let app = TestApp::builder().uploader(RejectingUploader).build();
    let form = article_form("Flood maps released", "Officials published new flood maps today.")
        .file("files", "map.png", "image/png", b"png");

    let resp = app.send(form.into_request("/api/v1/articles")).await;
    assert_error_response(resp, StatusCode::BAD_GATEWAY, "Bad Gateway").await;

    let (_, page) = read_json(app.get("/api/v1/articles").await).await;
    assert!(page["items"].as_array().unwrap().is_empty());
    assert!(app.recorder.urls().is_empty());
}

#[tokio::test]
async fn e2e_refresh_facebook_token() {
    let app = TestApp::new();
    let (status, body) = read_json(
        app.empty(Method::POST, "/api/v1/channels/facebook/refresh-token")
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "channel": "facebook", "accessToken": "page-token-2" }));
}

#[tokio::test]
async fn e2e_share_story_forwards_to_the_feed() {
    let app = TestApp::new();
    let (status, body) = read_json(
        app.json(
            Method::POST,
            "/api/v1/channels/facebook/stories",
            &json!({ "imageUrl": "https://cdn.example/a.png", "link": "https://news.example/noticias/a" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reference"], "story-1");
    assert_eq!(app.feed.stories.lock().unwrap().len(), 1);

    let blank = app
        .json(
            Method::POST,
            "/api/v1/channels/facebook/stories",
            &json!({ "imageUrl": " ", "link": "https://news.example/noticias/a" }),
        )
        .await;
    assert_error_response(blank, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn e2e_post_twitter_update() {
    let app = TestApp::new();
    let (status, body) = read_json(
        app.json(
            Method::POST,
            "/api/v1/channels/twitter/updates",
            &json!({ "text": "Polls close at 8pm", "url": "https://news.example/noticias/polls" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channel"], "twitter");
    assert_eq!(
        app.timeline.updates.lock().unwrap().as_slice(),
        ["Polls close at 8pm\nhttps://news.example/noticias/polls".to_string()]
    );
}

#[tokio::test]
async fn e2e_unconfigured_channels_return_502() {
    let app = TestApp::builder()
        .social_feed(UnconfiguredChannels)
        .timeline(UnconfiguredChannels)
        .build();

    let refresh = app
        .empty(Method::POST, "/api/v1/channels/facebook/refresh-token")
        .await;
    assert_error_response(refresh, StatusCode::BAD_GATEWAY, "Bad Gateway").await;

    let update = app
        .json(
            Method::POST,
            "/api/v1/channels/twitter/updates",
            &json!({ "text": "hello" }),
        )
        .await;
    assert_error_response(update, StatusCode::BAD_GATEWAY, "Bad Gateway").await;
}
