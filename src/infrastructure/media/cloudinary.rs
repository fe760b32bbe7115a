use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::fmt::Write as _;

use crate::application::ports::media::{MediaBlob, MediaError, MediaKind, MediaUploader, UploadedMedia};
use crate::config::CloudinarySettings;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

struct Credentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

/// Signed uploads to the Cloudinary REST API.
pub struct CloudinaryUploader {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(client: reqwest::Client, settings: &CloudinarySettings) -> Self {
        let credentials = match (
            settings.cloud_name.clone(),
            settings.api_key.clone(),
            settings.api_secret.clone(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => {
                tracing::error!("cloudinary credentials are missing; media uploads will fail");
                None
            }
        };
        Self {
            client,
            credentials,
        }
    }
}

/// Cloudinary request signature: parameters sorted by key, joined as `k=v&k=v`,
/// suffixed with the API secret and hashed with SHA-1 (lowercase hex).
fn signature(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable_by_key(|(key, _)| *key);
    let payload = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha1::digest(format!("{payload}{api_secret}").as_bytes());
    digest.iter().fold(String::with_capacity(40), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, blob: &MediaBlob, kind: MediaKind) -> Result<UploadedMedia, MediaError> {
        let credentials = self.credentials.as_ref().ok_or(MediaError::NotConfigured)?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = signature(&[("timestamp", timestamp.as_str())], &credentials.api_secret);
        let file_name = blob
            .file_name
            .clone()
            .unwrap_or_else(|| format!("upload-{timestamp}"));
        let part = Part::bytes(blob.bytes.to_vec())
            .file_name(file_name)
            .mime_str(&blob.content_type)
            .map_err(|err| MediaError::Malformed(err.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("api_key", credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let endpoint = format!(
            "{API_BASE}/{}/{}/upload",
            credentials.cloud_name,
            kind.as_str()
        );
        let resp = self
            .client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| MediaError::Transport(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|err| MediaError::Malformed(err.to_string()))?;
        Ok(UploadedMedia {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }
}
