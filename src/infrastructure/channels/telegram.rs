use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::api_error;
use crate::application::ports::channel::{
    Channel, ChannelError, ChannelPublisher, DeliveryOutcome, Publication,
};
use crate::config::TelegramSettings;

const BOT_API: &str = "https://api.telegram.org";

struct Destination {
    bot_token: String,
    channel_id: String,
}

/// Broadcasts the article link to a single Telegram channel through the Bot API.
pub struct TelegramPublisher {
    client: reqwest::Client,
    destination: Option<Destination>,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    result: Option<SentMessage>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

impl TelegramPublisher {
    pub fn new(client: reqwest::Client, settings: &TelegramSettings) -> Self {
        let destination = match (settings.bot_token.clone(), settings.channel_id.clone()) {
            (Some(bot_token), Some(channel_id)) => Some(Destination {
                bot_token,
                channel_id,
            }),
            (token, channel) => {
                if token.is_none() {
                    tracing::error!(channel = %Channel::Telegram, "telegram bot token is missing");
                }
                if channel.is_none() {
                    tracing::error!(channel = %Channel::Telegram, "telegram channel id is missing");
                }
                None
            }
        };
        Self {
            client,
            destination,
        }
    }

    fn message(publication: &Publication) -> String {
        format!("{}\n{}", publication.article.title, publication.canonical_url)
    }
}

#[async_trait]
impl ChannelPublisher for TelegramPublisher {
    fn channel(&self) -> Channel {
        Channel::Telegram
    }

    async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        let Some(destination) = &self.destination else {
            return Ok(DeliveryOutcome::skipped("telegram channel is not configured"));
        };

        let endpoint = format!("{BOT_API}/bot{}/sendMessage", destination.bot_token);
        let resp = self
            .client
            .post(&endpoint)
            .json(&json!({
                "chat_id": destination.channel_id,
                "text": Self::message(publication),
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let body: SendMessageResponse = resp.json().await?;
        match (body.ok, body.result) {
            (true, Some(sent)) => Ok(DeliveryOutcome::delivered(Some(sent.message_id.to_string()))),
            _ => Err(ChannelError::Unexpected(
                body.description
                    .unwrap_or_else(|| "sendMessage returned ok=false".into()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{
        Article, ArticleAuthor, ArticleCategory, ArticleContent, ArticleId, ArticleSlug,
        ArticleStatus, ArticleSubtitle, ArticleTags, ArticleTitle, ArticleType,
    };
    use chrono::Utc;

    fn publication() -> Publication {
        let now = Utc::now();
        Publication {
            article: Article {
                id: ArticleId::generate(),
                slug: ArticleSlug::new("cabinet-reshuffle").unwrap(),
                title: ArticleTitle::new("Cabinet reshuffle").unwrap(),
                subtitle: ArticleSubtitle::new("Three ministers out").unwrap(),
                author: ArticleAuthor::new("Desk").unwrap(),
                content: ArticleContent::new("body").unwrap(),
                category: ArticleCategory::Politics,
                article_type: ArticleType::News,
                status: ArticleStatus::Active,
                img_url: None,
                video_url: None,
                tags: ArticleTags::default(),
                views: 0,
                date: now,
                created_at: now,
                updated_at: now,
            },
            canonical_url: "https://news.example/noticias/cabinet-reshuffle".into(),
        }
    }

    #[test]
    fn message_carries_title_and_canonical_url() {
        assert_eq!(
            TelegramPublisher::message(&publication()),
            "Cabinet reshuffle\nhttps://news.example/noticias/cabinet-reshuffle"
        );
    }

    #[tokio::test]
    async fn unconfigured_publisher_skips() {
        let publisher = TelegramPublisher::new(
            reqwest::Client::new(),
            &TelegramSettings {
                bot_token: Some("123:abc".into()),
                channel_id: None,
            },
        );
        let outcome = publisher.publish(&publication()).await.unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Skipped { .. }));
    }
}
