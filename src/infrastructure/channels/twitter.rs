use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{
    api_error,
    oauth1::{OAuth1Credentials, OAuth1Nonce, authorization_header},
};
use crate::application::ports::channel::{
    Channel, ChannelError, ChannelPublisher, DeliveryOutcome, Publication, TimelineChannel,
};
use crate::config::TwitterSettings;

const TWEETS_ENDPOINT: &str = "https://api.twitter.com/2/tweets";

/// Posts single updates to the X/Twitter timeline with user-context OAuth 1.0a.
pub struct TwitterPublisher {
    client: reqwest::Client,
    credentials: Option<OAuth1Credentials>,
}

#[derive(Deserialize)]
struct TweetEnvelope {
    data: CreatedTweet,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

/// `text` plus the link on its own line, when one is given.
fn compose(text: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("{text}\n{url}"),
        None => text.to_string(),
    }
}

impl TwitterPublisher {
    pub fn new(client: reqwest::Client, settings: &TwitterSettings) -> Self {
        let credentials = match (
            settings.api_key.clone(),
            settings.api_secret_key.clone(),
            settings.access_token.clone(),
            settings.access_token_secret.clone(),
        ) {
            (Some(consumer_key), Some(consumer_secret), Some(token), Some(token_secret)) => {
                Some(OAuth1Credentials {
                    consumer_key,
                    consumer_secret,
                    token,
                    token_secret,
                })
            }
            _ => {
                tracing::error!(channel = %Channel::Twitter, "twitter API credentials are missing");
                None
            }
        };
        Self {
            client,
            credentials,
        }
    }

    async fn tweet(&self, credentials: &OAuth1Credentials, text: String) -> Result<String, ChannelError> {
        let nonce = Uuid::new_v4().simple().to_string();
        let authorization = authorization_header(
            credentials,
            "POST",
            TWEETS_ENDPOINT,
            &[],
            &OAuth1Nonce {
                nonce: &nonce,
                timestamp: Utc::now().timestamp(),
            },
        )?;

        let resp = self
            .client
            .post(TWEETS_ENDPOINT)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let created: TweetEnvelope = resp.json().await?;
        Ok(created.data.id)
    }
}

#[async_trait]
impl ChannelPublisher for TwitterPublisher {
    fn channel(&self) -> Channel {
        Channel::Twitter
    }

    async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        let Some(credentials) = &self.credentials else {
            return Ok(DeliveryOutcome::skipped("twitter client is not configured"));
        };
        let text = compose(
            publication.article.title.as_str(),
            Some(publication.canonical_url.as_str()),
        );
        let id = self.tweet(credentials, text).await?;
        Ok(DeliveryOutcome::delivered(Some(id)))
    }
}

#[async_trait]
impl TimelineChannel for TwitterPublisher {
    async fn post_update(&self, text: &str, url: Option<&str>) -> Result<String, ChannelError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ChannelError::NotConfigured(Channel::Twitter))?;
        self.tweet(credentials, compose(text, url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_text_puts_link_on_its_own_line() {
        assert_eq!(compose("Vote tonight", Some("https://n.example/x")), "Vote tonight\nhttps://n.example/x");
        assert_eq!(compose("Vote tonight", None), "Vote tonight");
    }

    #[tokio::test]
    async fn partial_credentials_disable_the_timeline() {
        let publisher = TwitterPublisher::new(
            reqwest::Client::new(),
            &TwitterSettings {
                api_key: Some("key".into()),
                ..TwitterSettings::default()
            },
        );
        let err = publisher.post_update("hello", None).await.unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(Channel::Twitter)));
    }
}
