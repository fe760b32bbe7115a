use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::api_error;
use crate::application::ports::channel::{
    Channel, ChannelError, ChannelPublisher, DeliveryOutcome, Publication, SocialFeedChannel,
};
use crate::config::FacebookSettings;

const GRAPH_API: &str = "https://graph.facebook.com/v21.0";

struct AppCredentials {
    app_id: String,
    app_secret: String,
}

/// Posts article links to a Facebook page feed via the Graph API.
///
/// The page token lives behind a lock so a refresh replaces it for every later post.
pub struct FacebookPublisher {
    client: reqwest::Client,
    page_id: Option<String>,
    access_token: RwLock<Option<String>>,
    app: Option<AppCredentials>,
}

#[derive(Deserialize)]
struct CreatedObject {
    id: String,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

impl FacebookPublisher {
    pub fn new(client: reqwest::Client, settings: &FacebookSettings) -> Self {
        if settings.page_access_token.is_none() {
            tracing::error!(channel = %Channel::Facebook, "facebook access token is missing");
        }
        if settings.page_id.is_none() {
            tracing::error!(channel = %Channel::Facebook, "facebook page id is missing");
        }
        let app = match (settings.app_id.clone(), settings.app_secret.clone()) {
            (Some(app_id), Some(app_secret)) => Some(AppCredentials { app_id, app_secret }),
            _ => {
                tracing::warn!(channel = %Channel::Facebook, "facebook app credentials are missing; token refresh is disabled");
                None
            }
        };
        Self {
            client,
            page_id: settings.page_id.clone(),
            access_token: RwLock::new(settings.page_access_token.clone()),
            app,
        }
    }

    fn current_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_token(&self, token: String) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Page id and token, or `None` when either is missing.
    fn target(&self) -> Option<(&str, String)> {
        Some((self.page_id.as_deref()?, self.current_token()?))
    }

    async fn post_to_page(&self, edge: &str, body: serde_json::Value) -> Result<String, ChannelError> {
        let page_id = self
            .page_id
            .as_deref()
            .ok_or(ChannelError::NotConfigured(Channel::Facebook))?;
        let resp = self
            .client
            .post(format!("{GRAPH_API}/{page_id}/{edge}"))
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let created: CreatedObject = resp.json().await?;
        Ok(created.id)
    }
}

#[async_trait]
impl ChannelPublisher for FacebookPublisher {
    fn channel(&self) -> Channel {
        Channel::Facebook
    }

    async fn publish(&self, publication: &Publication) -> Result<DeliveryOutcome, ChannelError> {
        let Some((_, token)) = self.target() else {
            return Ok(DeliveryOutcome::skipped("facebook page is not configured"));
        };
        let post_id = self
            .post_to_page(
                "feed",
                json!({ "link": publication.canonical_url, "access_token": token }),
            )
            .await?;
        Ok(DeliveryOutcome::delivered(Some(post_id)))
    }
}

#[async_trait]
impl SocialFeedChannel for FacebookPublisher {
    async fn refresh_access_token(&self) -> Result<String, ChannelError> {
        let (Some((page_id, short_lived)), Some(app)) = (self.target(), self.app.as_ref()) else {
            return Err(ChannelError::NotConfigured(Channel::Facebook));
        };

        let resp = self
            .client
            .get(format!("{GRAPH_API}/oauth/access_token"))
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", app.app_id.as_str()),
                ("client_secret", app.app_secret.as_str()),
                ("fb_exchange_token", short_lived.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let long_lived: AccessTokenResponse = resp.json().await?;

        let resp = self
            .client
            .get(format!("{GRAPH_API}/{page_id}"))
            .query(&[
                ("fields", "access_token"),
                ("access_token", long_lived.access_token.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let page: AccessTokenResponse = resp.json().await?;

        self.replace_token(page.access_token.clone());
        Ok(page.access_token)
    }

    async fn share_story(&self, image_url: &str, link: &str) -> Result<String, ChannelError> {
        let (_, token) = self
            .target()
            .ok_or(ChannelError::NotConfigured(Channel::Facebook))?;
        self.post_to_page(
            "stories",
            json!({ "image_url": image_url, "link": link, "access_token": token }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> FacebookPublisher {
        FacebookPublisher::new(
            reqwest::Client::new(),
            &FacebookSettings {
                page_id: Some("1234".into()),
                ..FacebookSettings::default()
            },
        )
    }

    #[tokio::test]
    async fn refresh_without_credentials_is_not_configured() {
        let err = unconfigured().refresh_access_token().await.unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(Channel::Facebook)));
    }

    #[tokio::test]
    async fn story_without_token_is_not_configured() {
        let err = unconfigured()
            .share_story("https://cdn.example/a.png", "https://news.example/a")
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured(_)));
    }

    #[test]
    fn replaced_token_is_used_afterwards() {
        let publisher = unconfigured();
        assert!(publisher.target().is_none());
        publisher.replace_token("page-token".into());
        assert_eq!(publisher.target(), Some(("1234", "page-token".to_string())));
    }
}
