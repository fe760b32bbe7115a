// src/application/commands/channels.rs
use std::sync::Arc;

use crate::application::{
    dto::{ChannelPostDto, TokenRefreshDto},
    error::{ApplicationError, ApplicationResult},
    ports::channel::{Channel, SocialFeedChannel, TimelineChannel},
};

pub struct ShareStoryCommand {
    pub image_url: String,
    pub link: String,
}

pub struct PostUpdateCommand {
    pub text: String,
    pub url: Option<String>,
}

/// Direct channel operations that sit outside the publication pipeline.
/// Unlike fan-out, their failures are reported to the caller.
pub struct ChannelCommandService {
    social_feed: Arc<dyn SocialFeedChannel>,
    timeline: Arc<dyn TimelineChannel>,
}

impl ChannelCommandService {
    pub fn new(social_feed: Arc<dyn SocialFeedChannel>, timeline: Arc<dyn TimelineChannel>) -> Self {
        Self {
            social_feed,
            timeline,
        }
    }

    pub async fn refresh_feed_token(&self) -> ApplicationResult<TokenRefreshDto> {
        let access_token = self.social_feed.refresh_access_token().await.map_err(|err| {
            tracing::error!(channel = %Channel::Facebook, error = %err, "token refresh failed");
            ApplicationError::from(err)
        })?;
        tracing::info!(channel = %Channel::Facebook, "page access token refreshed");
        Ok(TokenRefreshDto {
            channel: Channel::Facebook,
            access_token,
        })
    }

    pub async fn share_story(&self, command: ShareStoryCommand) -> ApplicationResult<ChannelPostDto> {
        let image_url = required(command.image_url, "imageUrl")?;
        let link = required(command.link, "link")?;
        let reference = self
            .social_feed
            .share_story(&image_url, &link)
            .await
            .map_err(|err| {
                tracing::error!(channel = %Channel::Facebook, error = %err, "story share failed");
                ApplicationError::from(err)
            })?;
        Ok(ChannelPostDto {
            channel: Channel::Facebook,
            reference,
        })
    }

    pub async fn post_update(&self, command: PostUpdateCommand) -> ApplicationResult<ChannelPostDto> {
        let text = required(command.text, "text")?;
        let url = command.url.filter(|u| !u.trim().is_empty());
        let reference = self
            .timeline
            .post_update(&text, url.as_deref())
            .await
            .map_err(|err| {
                tracing::error!(channel = %Channel::Twitter, error = %err, "timeline update failed");
                ApplicationError::from(err)
            })?;
        Ok(ChannelPostDto {
            channel: Channel::Twitter,
            reference,
        })
    }
}

fn required(value: String, field: &str) -> ApplicationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
