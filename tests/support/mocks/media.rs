// tests/support/mocks/media.rs
use async_trait::async_trait;
use newsdesk_core::application::ports::media::{
    MediaBlob, MediaError, MediaKind, MediaUploader, UploadedMedia,
};
use std::sync::Mutex;

/// Accepts every upload and hands back a deterministic CDN URL.
#[derive(Default)]
pub struct StubUploader {
    pub uploads: Mutex<Vec<(MediaKind, Option<String>)>>,
}

impl StubUploader {
    pub fn count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaUploader for StubUploader {
    async fn upload(&self, blob: &MediaBlob, kind: MediaKind) -> Result<UploadedMedia, MediaError> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((kind, blob.file_name.clone()));
        let public_id = format!("newsdesk/{kind}-{}", uploads.len());
        Ok(UploadedMedia {
            url: format!("https://cdn.example/{public_id}"),
            public_id,
        })
    }
}

pub struct RejectingUploader;

#[async_trait]
impl MediaUploader for RejectingUploader {
    async fn upload(&self, _blob: &MediaBlob, _kind: MediaKind) -> Result<UploadedMedia, MediaError> {
        Err(MediaError::Rejected {
            status: 400,
            message: "Invalid image file".into(),
        })
    }
}
