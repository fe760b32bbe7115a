// tests/support/mocks/channels.rs
use async_trait::async_trait;
use newsdesk_core::application::ports::channel::{
    Channel, ChannelError, ChannelPublisher, DeliveryOutcome, Publication, SocialFeedChannel,
    TimelineChannel,
};
use std::sync::Mutex;
use std::time::Duration;

/// Remembers every canonical URL it was asked to publish.
pub struct RecordingPublisher {
    channel: Channel,
    pub published: Mutex<Vec<String>>,
}

impl RecordingPublisher {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelPublisher for RecordingPublisher {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        self.published
            .lock()
            .unwrap()
            .push(publication.canonical_url.clone());
        Ok(DeliveryOutcome::delivered(Some("post-1".into())))
    }
}

pub struct FailingPublisher(pub Channel);

#[async_trait]
impl ChannelPublisher for FailingPublisher {
    fn channel(&self) -> Channel {
        self.0
    }

    async fn publish(&self, _publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        Err(ChannelError::Api {
            status: 401,
            message: "token expired".into(),
        })
    }
}

pub struct PanickingPublisher(pub Channel);

#[async_trait]
impl ChannelPublisher for PanickingPublisher {
    fn channel(&self) -> Channel {
        self.0
    }

    async fn publish(&self, _publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        panic!("publisher blew up");
    }
}

/// Never answers within any sane timeout.
pub struct StalledPublisher(pub Channel);

#[async_trait]
impl ChannelPublisher for StalledPublisher {
    fn channel(&self) -> Channel {
        self.0
    }

    async fn publish(&self, _publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(DeliveryOutcome::delivered(None))
    }
}

#[derive(Default)]
pub struct StubFeed {
    pub stories: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SocialFeedChannel for StubFeed {
    async fn refresh_access_token(&self) -> Result<String, ChannelError> {
        Ok("page-token-2".into())
    }

    async fn share_story(&self, image_url: &str, link: &str) -> Result<String, ChannelError> {
        self.stories
            .lock()
            .unwrap()
            .push((image_url.to_string(), link.to_string()));
        Ok("story-1".into())
    }
}

/// Feed and timeline that behave like a channel with no credentials.
pub struct UnconfiguredChannels;

#[async_trait]
impl SocialFeedChannel for UnconfiguredChannels {
    async fn refresh_access_token(&self) -> Result<String, ChannelError> {
        Err(ChannelError::NotConfigured(Channel::Facebook))
    }

    async fn share_story(&self, _image_url: &str, _link: &str) -> Result<String, ChannelError> {
        Err(ChannelError::NotConfigured(Channel::Facebook))
    }
}

#[async_trait]
impl TimelineChannel for UnconfiguredChannels {
    async fn post_update(&self, _text: &str, _url: Option<&str>) -> Result<String, ChannelError> {
        Err(ChannelError::NotConfigured(Channel::Twitter))
    }
}

#[derive(Default)]
pub struct StubTimeline {
    pub updates: Mutex<Vec<String>>,
}

#[async_trait]
impl TimelineChannel for StubTimeline {
    async fn post_update(&self, text: &str, url: Option<&str>) -> Result<String, ChannelError> {
        let body = match url {
            Some(url) => format!("{text}\n{url}"),
            None => text.to_string(),
        };
        self.updates.lock().unwrap().push(body);
        Ok("tweet-1".into())
    }
}
