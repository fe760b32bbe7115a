use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::media::{MediaBlob, MediaKind, MediaUploader, UploadedMedia},
};

/// Optional binary attachments submitted with an article.
#[derive(Debug, Clone, Default)]
pub struct MediaAttachments {
    pub image: Option<MediaBlob>,
    pub video: Option<MediaBlob>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub img_url: Option<String>,
    pub video_url: Option<String>,
}

/// Turns attachments into permanent URLs through the upload collaborator.
///
/// An uploaded blob wins over an explicit URL for the same slot; an explicit URL
/// without a blob is kept verbatim. Any upload failure aborts the whole resolution.
pub struct MediaCoordinator {
    uploader: Arc<dyn MediaUploader>,
}

impl MediaCoordinator {
    pub fn new(uploader: Arc<dyn MediaUploader>) -> Self {
        Self { uploader }
    }

    pub async fn resolve(
        &self,
        attachments: MediaAttachments,
        img_url: Option<String>,
        video_url: Option<String>,
    ) -> ApplicationResult<ResolvedMedia> {
        let img_url = match attachments.image {
            Some(blob) => Some(self.upload(&blob, MediaKind::Image).await?.url),
            None => non_blank(img_url),
        };
        let video_url = match attachments.video {
            Some(blob) => Some(self.upload(&blob, MediaKind::Video).await?.url),
            None => non_blank(video_url),
        };
        Ok(ResolvedMedia { img_url, video_url })
    }

    pub async fn upload(&self, blob: &MediaBlob, expected: MediaKind) -> ApplicationResult<UploadedMedia> {
        if blob.kind() != Some(expected) {
            return Err(ApplicationError::validation(format!(
                "file declared as `{}` is not an {expected}",
                blob.content_type
            )));
        }

        let uploaded = self.uploader.upload(blob, expected).await.map_err(|err| {
            tracing::error!(kind = %expected, error = %err, "media upload failed");
            ApplicationError::from(err)
        })?;
        tracing::info!(kind = %expected, public_id = %uploaded.public_id, "media uploaded");
        Ok(uploaded)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::media::MediaError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingUploader {
        calls: Mutex<Vec<MediaKind>>,
        fail: bool,
    }

    #[async_trait]
    impl MediaUploader for RecordingUploader {
        async fn upload(&self, _blob: &MediaBlob, kind: MediaKind) -> Result<UploadedMedia, MediaError> {
            self.calls.lock().unwrap().push(kind);
            if self.fail {
                return Err(MediaError::Transport("connection reset".into()));
            }
            Ok(UploadedMedia {
                url: format!("https://cdn.example/{kind}/1"),
                public_id: format!("{kind}-1"),
            })
        }
    }

    fn blob(content_type: &str) -> MediaBlob {
        MediaBlob::new(Some("file".into()), content_type, Bytes::from_static(b"raw"))
    }

    #[tokio::test]
    async fn explicit_urls_are_kept_without_uploading() {
        let uploader = Arc::new(RecordingUploader::default());
        let coordinator = MediaCoordinator::new(uploader.clone());

        let resolved = coordinator
            .resolve(
                MediaAttachments::default(),
                Some("https://img.example/a.png".into()),
                Some("   ".into()),
            )
            .await
            .unwrap();

        assert_eq!(resolved.img_url.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(resolved.video_url, None);
        assert!(uploader.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn explicit_urls_are_stored_unchanged() {
        let coordinator = MediaCoordinator::new(Arc::new(RecordingUploader::default()));

        let resolved = coordinator
            .resolve(
                MediaAttachments::default(),
                Some(" https://img.example/a.png ".into()),
                Some("https://video.example/clip.mp4\n".into()),
            )
            .await
            .unwrap();

        assert_eq!(resolved.img_url.as_deref(), Some(" https://img.example/a.png "));
        assert_eq!(resolved.video_url.as_deref(), Some("https://video.example/clip.mp4\n"));
    }

    #[tokio::test]
    async fn blobs_are_uploaded_by_kind_and_override_urls() {
        let uploader = Arc::new(RecordingUploader::default());
        let coordinator = MediaCoordinator::new(uploader.clone());

        let resolved = coordinator
            .resolve(
                MediaAttachments {
                    image: Some(blob("image/png")),
                    video: Some(blob("video/mp4")),
                },
                Some("https://img.example/old.png".into()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(resolved.img_url.as_deref(), Some("https://cdn.example/image/1"));
        assert_eq!(resolved.video_url.as_deref(), Some("https://cdn.example/video/1"));
        assert_eq!(*uploader.calls.lock().unwrap(), vec![MediaKind::Image, MediaKind::Video]);
    }

    #[tokio::test]
    async fn upload_failure_is_fatal() {
        let uploader = Arc::new(RecordingUploader {
            fail: true,
            ..RecordingUploader::default()
        });
        let coordinator = MediaCoordinator::new(uploader);

        let err = coordinator
            .resolve(
                MediaAttachments {
                    image: Some(blob("image/jpeg")),
                    video: None,
                },
                None,
                None,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::MediaUpload(_)));
    }

    #[tokio::test]
    async fn mismatched_mime_prefix_is_rejected_before_upload() {
        let uploader = Arc::new(RecordingUploader::default());
        let coordinator = MediaCoordinator::new(uploader.clone());

        let err = coordinator
            .upload(&blob("application/pdf"), MediaKind::Image)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
        assert!(uploader.calls.lock().unwrap().is_empty());
    }
}
