// src/presentation/http/controllers/channels.rs
use crate::application::{
    commands::channels::{PostUpdateCommand, ShareStoryCommand},
    dto::{ChannelPostDto, TokenRefreshDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareStoryRequest {
    pub image_url: String,
    pub link: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostUpdateRequest {
    pub text: String,
    pub url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/channels/facebook/refresh-token",
    responses(
        (status = 200, description = "Page token exchanged and stored for later posts.", body = TokenRefreshDto),
        (status = 502, description = "Channel rejected the exchange or is not configured.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Channels"
)]
pub async fn refresh_facebook_token(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<TokenRefreshDto>> {
    state
        .services
        .channel_commands
        .refresh_feed_token()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/channels/facebook/stories",
    request_body = ShareStoryRequest,
    responses(
        (status = 200, description = "Story shared.", body = ChannelPostDto),
        (status = 400, description = "Blank image URL or link.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Channel rejected the story.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Channels"
)]
pub async fn share_facebook_story(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<ShareStoryRequest>,
) -> HttpResult<Json<ChannelPostDto>> {
    state
        .services
        .channel_commands
        .share_story(ShareStoryCommand {
            image_url: payload.image_url,
            link: payload.link,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/channels/twitter/updates",
    request_body = PostUpdateRequest,
    responses(
        (status = 200, description = "Update posted.", body = ChannelPostDto),
        (status = 400, description = "Blank text.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Channel rejected the update.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Channels"
)]
pub async fn post_twitter_update(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<PostUpdateRequest>,
) -> HttpResult<Json<ChannelPostDto>> {
    state
        .services
        .channel_commands
        .post_update(PostUpdateCommand {
            text: payload.text,
            url: payload.url,
        })
        .await
        .into_http()
        .map(Json)
}
