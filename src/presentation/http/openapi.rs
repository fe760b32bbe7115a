// src/presentation/http/openapi.rs
use crate::application::dto::{ArticleDto, OffsetPage, SearchPage};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticlePageResponse {
    pub items: Vec<ArticleDto>,
    pub limit: u32,
    pub offset: u32,
}

/// `total` is the full match count, independent of `limit`/`offset`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleSearchResponse {
    pub items: Vec<ArticleDto>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::list_by_category,
        crate::presentation::http::controllers::articles::search_articles,
        crate::presentation::http::controllers::articles::articles_by_date,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::articles::increment_views,
        crate::presentation::http::controllers::uploads::upload_image,
        crate::presentation::http::controllers::uploads::upload_video,
        crate::presentation::http::controllers::channels::refresh_facebook_token,
        crate::presentation::http::controllers::channels::share_facebook_story,
        crate::presentation::http::controllers::channels::post_twitter_update,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            ArticlePageResponse,
            ArticleSearchResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::articles::ArticleListParams,
            crate::presentation::http::controllers::articles::SearchParams,
            crate::presentation::http::controllers::articles::CreateArticleForm,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::uploads::UploadForm,
            crate::presentation::http::controllers::channels::ShareStoryRequest,
            crate::presentation::http::controllers::channels::PostUpdateRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::UploadedMediaDto,
            crate::application::dto::ChannelPostDto,
            crate::application::dto::TokenRefreshDto
        )
    ),
    tags(
        (name = "Articles", description = "Article lifecycle and reads"),
        (name = "Uploads", description = "Standalone media uploads"),
        (name = "Channels", description = "Direct social channel operations"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Newsdesk API",
        description = "Newsroom publishing backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs` (which also serves `/openapi.json`) and Redoc at `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn snapshot_path() -> String {
    env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string())
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path = snapshot_path();
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

impl From<OffsetPage<ArticleDto>> for ArticlePageResponse {
    fn from(page: OffsetPage<ArticleDto>) -> Self {
        Self {
            items: page.items,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

impl From<SearchPage<ArticleDto>> for ArticleSearchResponse {
    fn from(page: SearchPage<ArticleDto>) -> Self {
        Self {
            items: page.items,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}
