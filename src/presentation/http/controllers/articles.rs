// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        CreateArticleCommand, DeleteArticleCommand, IncrementViewsCommand, UpdateArticleCommand,
    },
    dto::ArticleDto,
    ports::media::{MediaBlob, MediaKind},
    queries::articles::{
        ArticlesByDateQuery, GetArticleQuery, ListArticlesQuery, SearchArticlesQuery,
    },
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::openapi::{ArticlePageResponse, ArticleSearchResponse, StatusResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    #[serde(alias = "q")]
    pub query: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Multipart form accepted by `POST /api/v1/articles`. Documentation only; the
/// handler reads the parts directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateArticleForm {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: String,
    pub category: String,
    pub article_type: String,
    pub status: Option<String>,
    pub date: String,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    /// Up to one `image/*` and one `video/*` file.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub article_type: Option<String>,
    pub status: Option<String>,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub date: Option<String>,
}

/// Reads every part of the create form. Files are routed to the image or video slot
/// by their declared MIME prefix; the first file of each kind wins and anything
/// else is skipped.
async fn read_create_form(mut multipart: Multipart) -> HttpResult<CreateArticleCommand> {
    let mut builder = CreateArticleCommand::builder();
    let mut image_seen = false;
    let mut video_seen = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::bad_request(err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        if file_name.is_some() || name == "files" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| HttpError::bad_request(err.body_text()))?;
            let blob = MediaBlob::new(file_name, content_type, bytes);
            match blob.kind() {
                Some(MediaKind::Image) if !image_seen => {
                    image_seen = true;
                    builder = builder.image(blob);
                }
                Some(MediaKind::Video) if !video_seen => {
                    video_seen = true;
                    builder = builder.video(blob);
                }
                Some(kind) => {
                    tracing::debug!(%kind, "ignoring extra attachment");
                }
                None => {
                    tracing::warn!(content_type = %blob.content_type, "ignoring attachment that is neither image nor video");
                }
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;
        builder = match name.as_str() {
            "title" => builder.title(value),
            "subtitle" => builder.subtitle(value),
            "author" => builder.author(value),
            "content" => builder.content(value),
            "category" => builder.category(value),
            "articleType" | "article_type" => builder.article_type(value),
            "status" => builder.status(value),
            "date" => builder.date(value),
            "imgUrl" | "img_url" => builder.img_url(value),
            "videoUrl" | "video_url" => builder.video_url(value),
            _ => builder,
        };
    }

    builder.build().map_err(HttpError::bad_request)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body(content = CreateArticleForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Article stored; channel fan-out already attempted.", body = ArticleDto),
        (status = 400, description = "Invalid form.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Article already exists.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Media upload failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = read_create_form(multipart).await?;
    let article = state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Newest-first page of articles.", body = ArticlePageResponse),
        (status = 400, description = "Unknown category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<ArticlePageResponse>> {
    let page = state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            limit: params.limit,
            offset: params.offset,
            category: params.category,
        })
        .await
        .into_http()?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/category",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Newest-first page of one category.", body = ArticlePageResponse),
        (status = 400, description = "Missing or unknown category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_by_category(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<ArticlePageResponse>> {
    let page = state
        .services
        .article_queries
        .list_by_category(ListArticlesQuery {
            limit: params.limit,
            offset: params.offset,
            category: params.category,
        })
        .await
        .into_http()?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Relevance-ordered matches with the total match count.", body = ArticleSearchResponse),
        (status = 400, description = "Blank query.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No matches.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn search_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SearchParams>,
) -> HttpResult<Json<ArticleSearchResponse>> {
    let page = state
        .services
        .article_queries
        .search_articles(SearchArticlesQuery {
            query: params.query,
            limit: params.limit,
            offset: params.offset,
        })
        .await
        .into_http()?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/date/{date}",
    params(("date" = String, Path, description = "`YYYY-MM-DD` or an RFC 3339 timestamp")),
    responses(
        (status = 200, description = "Articles of that local day, newest first.", body = [ArticleDto]),
        (status = 400, description = "Unparseable date.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Nothing published that day.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn articles_by_date(
    Extension(state): Extension<HttpState>,
    Path(date): Path<String>,
) -> HttpResult<Json<Vec<ArticleDto>>> {
    state
        .services
        .article_queries
        .articles_by_date(ArticlesByDateQuery { date })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{term}",
    params(("term" = String, Path, description = "Article id or slug")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 400, description = "Blank term.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No article matches.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(term): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article(GetArticleQuery { term })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/articles/{term}",
    params(("term" = String, Path, description = "Article id or slug")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article.", body = ArticleDto),
        (status = 400, description = "Invalid field.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No article matches.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug owned by another article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Path(term): Path<String>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        term,
        slug: payload.slug,
        title: payload.title,
        subtitle: payload.subtitle,
        author: payload.author,
        content: payload.content,
        category: payload.category,
        article_type: payload.article_type,
        status: payload.status,
        img_url: payload.img_url,
        video_url: payload.video_url,
        date: payload.date,
    };

    state
        .services
        .article_commands
        .update_article(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{term}",
    params(("term" = String, Path, description = "Article id or slug")),
    responses(
        (status = 200, description = "Article deleted.", body = StatusResponse),
        (status = 404, description = "No article matches.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(term): Path<String>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { term })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/articles/{term}/increment-views",
    params(("term" = String, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article with the incremented counter.", body = ArticleDto),
        (status = 404, description = "Unknown id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn increment_views(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .increment_views(IncrementViewsCommand { id })
        .await
        .into_http()
        .map(Json)
}
