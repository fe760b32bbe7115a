use crate::application::ports::media::UploadedMedia;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMediaDto {
    pub url: String,
    pub public_id: String,
}

impl From<UploadedMedia> for UploadedMediaDto {
    fn from(media: UploadedMedia) -> Self {
        Self {
            url: media.url,
            public_id: media.public_id,
        }
    }
}
