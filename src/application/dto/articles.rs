use crate::domain::article::{Article, ArticleCategory, ArticleStatus, ArticleType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: String,
    pub category: ArticleCategory,
    pub article_type: ArticleType,
    pub status: ArticleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub tags: Vec<String>,
    pub views: u64,
    #[serde(with = "serde_time")]
    pub date: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            slug: article.slug.into_inner(),
            title: article.title.into_inner(),
            subtitle: article.subtitle.into_inner(),
            author: article.author.into_inner(),
            content: article.content.into_inner(),
            category: article.category,
            article_type: article.article_type,
            status: article.status,
            img_url: article.img_url,
            video_url: article.video_url,
            tags: article.tags.into_inner(),
            views: article.views,
            date: article.date,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
