use std::{sync::Arc, time::Duration};

use futures::future::join_all;

use crate::{
    application::ports::channel::{
        Channel, ChannelDelivery, ChannelPublisher, DeliveryOutcome, Publication,
    },
    domain::article::Article,
};

/// Builds the public URL of an article: `<base>/<prefix>/<slug>`.
#[derive(Debug, Clone)]
pub struct ArticleLinks {
    base_url: String,
    path_prefix: String,
}

impl ArticleLinks {
    pub fn new(base_url: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            path_prefix: path_prefix.into().trim_matches('/').to_string(),
        }
    }

    pub fn canonical_url(&self, article: &Article) -> String {
        if self.path_prefix.is_empty() {
            format!("{}/{}", self.base_url, article.slug)
        } else {
            format!("{}/{}/{}", self.base_url, self.path_prefix, article.slug)
        }
    }
}

/// Dispatches a freshly persisted article to every configured channel.
///
/// Each publisher runs in its own task under its own timeout. The dispatcher waits
/// for all of them to settle; a panic, an error and a timeout all collapse into
/// `DeliveryOutcome::Failed` for that channel only.
pub struct PublicationFanout {
    publishers: Vec<Arc<dyn ChannelPublisher>>,
    timeout: Duration,
    links: ArticleLinks,
}

impl PublicationFanout {
    pub fn new(
        publishers: Vec<Arc<dyn ChannelPublisher>>,
        timeout: Duration,
        links: ArticleLinks,
    ) -> Self {
        Self {
            publishers,
            timeout,
            links,
        }
    }

    pub async fn dispatch(&self, article: &Article) -> Vec<ChannelDelivery> {
        let publication = Arc::new(Publication {
            canonical_url: self.links.canonical_url(article),
            article: article.clone(),
        });

        let attempts = self.publishers.iter().map(|publisher| {
            let channel = publisher.channel();
            let publisher = Arc::clone(publisher);
            let publication = Arc::clone(&publication);
            let timeout = self.timeout;
            let handle = tokio::spawn(async move {
                match tokio::time::timeout(timeout, publisher.publish(&publication)).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(err)) => DeliveryOutcome::failed(err.to_string()),
                    Err(_) => DeliveryOutcome::failed(format!(
                        "timed out after {}ms",
                        timeout.as_millis()
                    )),
                }
            });
            async move {
                let outcome = handle.await.unwrap_or_else(|join_err| {
                    DeliveryOutcome::failed(format!("publisher task aborted: {join_err}"))
                });
                ChannelDelivery { channel, outcome }
            }
        });

        let deliveries = join_all(attempts).await;
        for delivery in &deliveries {
            log_delivery(&publication.article, delivery);
        }
        deliveries
    }
}

fn log_delivery(article: &Article, delivery: &ChannelDelivery) {
    let channel: Channel = delivery.channel;
    match &delivery.outcome {
        DeliveryOutcome::Delivered { reference } => tracing::info!(
            channel = %channel,
            article_id = %article.id,
            reference = reference.as_deref().unwrap_or("-"),
            "article delivered"
        ),
        DeliveryOutcome::Skipped { reason } => tracing::warn!(
            channel = %channel,
            article_id = %article.id,
            %reason,
            "article delivery skipped"
        ),
        DeliveryOutcome::Failed { reason } => tracing::error!(
            channel = %channel,
            article_id = %article.id,
            %reason,
            "article delivery failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::channel::ChannelError;
    use crate::domain::article::{
        ArticleAuthor, ArticleCategory, ArticleContent, ArticleId, ArticleSlug, ArticleStatus,
        ArticleSubtitle, ArticleTags, ArticleTitle, ArticleType,
    };
    use async_trait::async_trait;
    use chrono::Utc;

    enum Behaviour {
        Deliver,
        Fail,
        Panic,
        Hang,
    }

    struct ScriptedPublisher {
        channel: Channel,
        behaviour: Behaviour,
    }

    #[async_trait]
    impl ChannelPublisher for ScriptedPublisher {
        fn channel(&self) -> Channel {
            self.channel
        }

        async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
            match self.behaviour {
                Behaviour::Deliver => Ok(DeliveryOutcome::delivered(Some(
                    publication.canonical_url.clone(),
                ))),
                Behaviour::Fail => Err(ChannelError::Api {
                    status: 500,
                    message: "upstream exploded".into(),
                }),
                Behaviour::Panic => panic!("publisher bug"),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(DeliveryOutcome::delivered(None))
                }
            }
        }
    }

    fn publisher(channel: Channel, behaviour: Behaviour) -> Arc<dyn ChannelPublisher> {
        Arc::new(ScriptedPublisher { channel, behaviour })
    }

    fn article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::generate(),
            slug: ArticleSlug::new("budget-vote").unwrap(),
            title: ArticleTitle::new("Budget vote").unwrap(),
            subtitle: ArticleSubtitle::new("Tonight").unwrap(),
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
        }
    }

    #[test]
    fn canonical_url_joins_base_prefix_and_slug() {
        let links = ArticleLinks::new("https://news.example/", "/noticias/");
        assert_eq!(
            links.canonical_url(&article()),
            "https://news.example/noticias/budget-vote"
        );
        let bare = ArticleLinks::new("https://news.example", "");
        assert_eq!(bare.canonical_url(&article()), "https://news.example/budget-vote");
    }

    #[tokio::test]
    async fn failures_are_isolated_per_channel() {
        let fanout = PublicationFanout::new(
            vec![
                publisher(Channel::Telegram, Behaviour::Fail),
                publisher(Channel::Facebook, Behaviour::Deliver),
                publisher(Channel::Twitter, Behaviour::Panic),
            ],
            Duration::from_secs(5),
            ArticleLinks::new("https://news.example", "noticias"),
        );

        let deliveries = fanout.dispatch(&article()).await;

        assert_eq!(deliveries.len(), 3);
        assert!(matches!(deliveries[0].outcome, DeliveryOutcome::Failed { .. }));
        assert_eq!(
            deliveries[1].outcome,
            DeliveryOutcome::delivered(Some("https://news.example/noticias/budget-vote".into()))
        );
        assert!(matches!(deliveries[2].outcome, DeliveryOutcome::Failed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_channel_times_out_without_blocking_others() {
        let fanout = PublicationFanout::new(
            vec![
                publisher(Channel::Telegram, Behaviour::Hang),
                publisher(Channel::Twitter, Behaviour::Deliver),
            ],
            Duration::from_millis(250),
            ArticleLinks::new("https://news.example", "noticias"),
        );

        let deliveries = fanout.dispatch(&article()).await;

        match &deliveries[0].outcome {
            DeliveryOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
        assert!(deliveries[1].outcome.is_delivered());
    }
}
