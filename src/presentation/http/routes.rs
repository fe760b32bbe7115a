// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, channels, uploads},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Multipart bodies carry video, so the default 2 MiB cap is far too small.
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Full router with per-IP rate limiting. Must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the limiter can key on the peer.
pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    build_router_with_rate_limiter(state, allowed_origins, true)
}

pub fn build_router_with_rate_limiter(
    state: HttpState,
    allowed_origins: &[String],
    rate_limited: bool,
) -> Router {
    let router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/api/v1/articles/category", get(articles::list_by_category))
        .route("/api/v1/articles/search", get(articles::search_articles))
        .route("/api/v1/articles/date/{date}", get(articles::articles_by_date))
        .route(
            "/api/v1/articles/{term}",
            get(articles::get_article)
                .patch(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{term}/increment-views",
            patch(articles::increment_views),
        )
        .route("/api/v1/uploads/image", post(uploads::upload_image))
        .route("/api/v1/uploads/video", post(uploads::upload_video))
        .route(
            "/api/v1/channels/facebook/refresh-token",
            post(channels::refresh_facebook_token),
        )
        .route(
            "/api/v1/channels/facebook/stories",
            post(channels::share_facebook_story),
        )
        .route(
            "/api/v1/channels/twitter/updates",
            post(channels::post_twitter_update),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state));

    match rate_limit_layer() {
        Some(limiter) if rate_limited => router.layer(limiter),
        Some(_) => router,
        None => {
            tracing::warn!("rate limiter configuration rejected; serving without it");
            router
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
