// src/presentation/http/controllers/uploads.rs
use crate::application::{
    dto::UploadedMediaDto,
    ports::media::{MediaBlob, MediaKind},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Multipart, http::StatusCode};
use utoipa::ToSchema;

/// Single-file multipart body. Documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// First file part of the form, whatever its field name.
async fn first_file(mut multipart: Multipart) -> HttpResult<MediaBlob> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::bad_request(err.body_text()))?
    {
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;
        return Ok(MediaBlob::new(file_name, content_type, bytes));
    }
    Err(HttpError::bad_request("no file supplied"))
}

async fn upload(
    state: &HttpState,
    multipart: Multipart,
    kind: MediaKind,
) -> HttpResult<(StatusCode, Json<UploadedMediaDto>)> {
    let blob = first_file(multipart).await?;
    let uploaded = state.services.media.upload(&blob, kind).await.into_http()?;
    Ok((StatusCode::CREATED, Json(uploaded.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/uploads/image",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored.", body = UploadedMediaDto),
        (status = 400, description = "Missing file or not an image.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Upload collaborator failed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Uploads"
)]
pub async fn upload_image(
    Extension(state): Extension<HttpState>,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<UploadedMediaDto>)> {
    upload(&state, multipart, MediaKind::Image).await
}

#[utoipa::path(
    post,
    path = "/api/v1/uploads/video",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video stored.", body = UploadedMediaDto),
        (status = 400, description = "Missing file or not a video.", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Upload collaborator failed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Uploads"
)]
pub async fn upload_video(
    Extension(state): Extension<HttpState>,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<UploadedMediaDto>)> {
    upload(&state, multipart, MediaKind::Video).await
}
