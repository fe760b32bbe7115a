// tests/support/helpers.rs
use super::mocks::{self, RecordingPublisher, StubFeed, StubTimeline, StubUploader};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use newsdesk_core::application::ports::{
    channel::{Channel, ChannelPublisher, SocialFeedChannel, TimelineChannel},
    media::MediaUploader,
    time::Clock,
    util::SlugGenerator,
};
use newsdesk_core::application::services::{
    ApplicationServices, Collaborators, fanout::ArticleLinks,
};
use newsdesk_core::domain::article::{
    ArticleReadRepository, ArticleWriteRepository, EditorialCalendar,
};
use newsdesk_core::infrastructure::{
    repositories::InMemoryArticleRepository, util::DefaultSlugGenerator,
};
use newsdesk_core::presentation::http::{routes, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt as _;

pub const FRONTEND: &str = "https://news.example";

/// Router over the in-memory store plus handles on the collaborators behind it.
pub struct TestApp {
    pub router: axum::Router,
    pub repo: Arc<InMemoryArticleRepository>,
    pub uploader: Arc<StubUploader>,
    pub recorder: Arc<RecordingPublisher>,
    pub feed: Arc<StubFeed>,
    pub timeline: Arc<StubTimeline>,
}

pub struct TestAppBuilder {
    extra_publishers: Vec<Arc<dyn ChannelPublisher>>,
    uploader: Option<Arc<dyn MediaUploader>>,
    write_repo: Option<Arc<dyn ArticleWriteRepository>>,
    social_feed: Option<Arc<dyn SocialFeedChannel>>,
    timeline: Option<Arc<dyn TimelineChannel>>,
}

impl TestAppBuilder {
    pub fn publisher(mut self, publisher: impl ChannelPublisher + 'static) -> Self {
        self.extra_publishers.push(Arc::new(publisher));
        self
    }

    pub fn uploader(mut self, uploader: impl MediaUploader + 'static) -> Self {
        self.uploader = Some(Arc::new(uploader));
        self
    }

    /// Replaces the write side only; reads still go to the in-memory store.
    pub fn write_repo(mut self, repo: impl ArticleWriteRepository + 'static) -> Self {
        self.write_repo = Some(Arc::new(repo));
        self
    }

    pub fn social_feed(mut self, feed: impl SocialFeedChannel + 'static) -> Self {
        self.social_feed = Some(Arc::new(feed));
        self
    }

    pub fn timeline(mut self, timeline: impl TimelineChannel + 'static) -> Self {
        self.timeline = Some(Arc::new(timeline));
        self
    }

    pub fn build(self) -> TestApp {
        let repo = Arc::new(InMemoryArticleRepository::default());
        let uploader = Arc::new(StubUploader::default());
        let recorder = Arc::new(RecordingPublisher::new(Channel::Telegram));
        let feed = Arc::new(StubFeed::default());
        let timeline = Arc::new(StubTimeline::default());

        let mut publishers: Vec<Arc<dyn ChannelPublisher>> = vec![recorder.clone() as Arc<dyn ChannelPublisher>];
        publishers.extend(self.extra_publishers);

        let collaborators = Collaborators {
            uploader: self
                .uploader
                .unwrap_or_else(|| uploader.clone() as Arc<dyn MediaUploader>),
            publishers,
            social_feed: self
                .social_feed
                .unwrap_or_else(|| feed.clone() as Arc<dyn SocialFeedChannel>),
            timeline: self
                .timeline
                .unwrap_or_else(|| timeline.clone() as Arc<dyn TimelineChannel>),
        };

        let write: Arc<dyn ArticleWriteRepository> = self
            .write_repo
            .unwrap_or_else(|| repo.clone() as Arc<dyn ArticleWriteRepository>);
        let read: Arc<dyn ArticleReadRepository> = repo.clone();
        let clock: Arc<dyn Clock> = Arc::new(mocks::FixedClock);
        let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

        let services = Arc::new(ApplicationServices::new(
            write,
            read,
            collaborators,
            Duration::from_millis(500),
            ArticleLinks::new(FRONTEND, "noticias"),
            EditorialCalendar::utc(),
            clock,
            slugger,
        ));

        let router =
            routes::build_router_with_rate_limiter(HttpState { services }, &[], false);

        TestApp {
            router,
            repo,
            uploader,
            recorder,
            feed,
            timeline,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            extra_publishers: Vec::new(),
            uploader: None,
            write_repo: None,
            social_feed: None,
            timeline: None,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, payload: &Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn empty(&self, method: Method, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Posts a create form and returns the created article, asserting 201.
    pub async fn create(&self, form: super::builders::MultipartForm) -> Value {
        let resp = self.send(form.into_request("/api/v1/articles")).await;
        let (status, body) = read_json(resp).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body
    }
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Assert that a response is an `ErrorResponse` JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let (_, json) = read_json(resp).await;
    let err_field = json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
