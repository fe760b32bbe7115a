// src/application/ports/channel.rs
use crate::domain::article::Article;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Chat broadcast channel.
    Telegram,
    /// Social page feed.
    Facebook,
    /// Social timeline.
    Twitter,
}

impl Channel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted article together with its public URL, as handed to every channel.
#[derive(Debug, Clone)]
pub struct Publication {
    pub article: Article,
    pub canonical_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { reference: Option<String> },
    Skipped { reason: String },
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn delivered(reference: Option<String>) -> Self {
        Self::Delivered { reference }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Outcome of one delivery attempt for one channel. Logged, never persisted or retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDelivery {
    pub channel: Channel,
    pub outcome: DeliveryOutcome,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("{0} channel is not configured")]
    NotConfigured(Channel),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ChannelError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    fn channel(&self) -> Channel;

    /// Single delivery attempt. An unconfigured publisher returns `Skipped`.
    async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError>;
}

/// Page-feed operations that live outside the publish path.
#[async_trait]
pub trait SocialFeedChannel: Send + Sync {
    /// Exchanges the current short-lived credential for a long-lived one, then for a
    /// page-scoped token, which replaces the token used by subsequent posts.
    async fn refresh_access_token(&self) -> Result<String, ChannelError>;

    async fn share_story(&self, image_url: &str, link: &str) -> Result<String, ChannelError>;
}

#[async_trait]
pub trait TimelineChannel: Send + Sync {
    async fn post_update(&self, text: &str, url: Option<&str>) -> Result<String, ChannelError>;
}
