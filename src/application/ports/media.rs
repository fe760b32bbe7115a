// src/application/ports/media.rs
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies by the declared MIME prefix only; the payload is never inspected.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let mime = content_type.trim().to_ascii_lowercase();
        if mime.starts_with("image") {
            Some(Self::Image)
        } else if mime.starts_with("video") {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct MediaBlob {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl MediaBlob {
    pub fn new(file_name: Option<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media uploader is not configured")]
    NotConfigured,
    #[error("upload transport error: {0}")]
    Transport(String),
    #[error("upload rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected upload response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, blob: &MediaBlob, kind: MediaKind) -> Result<UploadedMedia, MediaError>;
}
