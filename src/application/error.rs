// src/application/error.rs
use crate::application::ports::{channel::ChannelError, media::MediaError};
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("media upload failed: {0}")]
    MediaUpload(String),

    #[error("channel delivery failed: {0}")]
    Channel(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn media_upload(msg: impl Into<String>) -> Self {
        Self::MediaUpload(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Collapses a wrapped domain error into the matching application variant.
    #[must_use]
    pub fn flatten(self) -> Self {
        match self {
            Self::Domain(DomainError::Validation(msg)) => Self::Validation(msg),
            Self::Domain(DomainError::DuplicateKey(msg)) => Self::Conflict(msg),
            Self::Domain(DomainError::NotFound(msg)) => Self::NotFound(msg),
            Self::Domain(DomainError::Persistence(msg)) => Self::Infrastructure(msg),
            other => other,
        }
    }
}

impl From<MediaError> for ApplicationError {
    fn from(err: MediaError) -> Self {
        Self::MediaUpload(err.to_string())
    }
}

impl From<ChannelError> for ApplicationError {
    fn from(err: ChannelError) -> Self {
        Self::Channel(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_maps_store_error_kinds() {
        let err = ApplicationError::from(DomainError::DuplicateKey("slug".into())).flatten();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        let err = ApplicationError::from(DomainError::Persistence("io".into())).flatten();
        assert!(matches!(err, ApplicationError::Infrastructure(_)));

        let err = ApplicationError::media_upload("boom").flatten();
        assert!(matches!(err, ApplicationError::MediaUpload(_)));
    }
}
