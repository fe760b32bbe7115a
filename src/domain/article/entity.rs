// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleAuthor, ArticleCategory, ArticleContent, ArticleId, ArticleSlug, ArticleStatus,
    ArticleSubtitle, ArticleTags, ArticleTitle, ArticleType,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub subtitle: ArticleSubtitle,
    pub author: ArticleAuthor,
    pub content: ArticleContent,
    pub category: ArticleCategory,
    pub article_type: ArticleType,
    pub status: ArticleStatus,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub tags: ArticleTags,
    pub views: u64,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Applies the editable fields of `update`. Tags and views are never touched here.
    pub fn apply(&mut self, update: &ArticleUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(subtitle) = &update.subtitle {
            self.subtitle = subtitle.clone();
        }
        if let Some(author) = &update.author {
            self.author = author.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(article_type) = update.article_type {
            self.article_type = article_type;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(img_url) = &update.img_url {
            self.img_url = Some(img_url.clone());
        }
        if let Some(video_url) = &update.video_url {
            self.video_url = Some(video_url.clone());
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(slug) = &update.slug {
            self.slug = slug.clone();
        }
        self.updated_at = update.updated_at;
    }
}

/// Fully resolved record handed to the store by the publication pipeline.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub subtitle: ArticleSubtitle,
    pub author: ArticleAuthor,
    pub content: ArticleContent,
    pub category: ArticleCategory,
    pub article_type: ArticleType,
    pub status: ArticleStatus,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub tags: ArticleTags,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub slug: Option<ArticleSlug>,
    pub title: Option<ArticleTitle>,
    pub subtitle: Option<ArticleSubtitle>,
    pub author: Option<ArticleAuthor>,
    pub content: Option<ArticleContent>,
    pub category: Option<ArticleCategory>,
    pub article_type: Option<ArticleType>,
    pub status: Option<ArticleStatus>,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            slug: None,
            title: None,
            subtitle: None,
            author: None,
            content: None,
            category: None,
            article_type: None,
            status: None,
            img_url: None,
            video_url: None,
            date: None,
            updated_at,
        }
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_subtitle(mut self, subtitle: ArticleSubtitle) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn with_author(mut self, author: ArticleAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_category(mut self, category: ArticleCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_article_type(mut self, article_type: ArticleType) -> Self {
        self.article_type = Some(article_type);
        self
    }

    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_img_url(mut self, url: impl Into<String>) -> Self {
        self.img_url = Some(url.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.title.is_none()
            && self.subtitle.is_none()
            && self.author.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.article_type.is_none()
            && self.status.is_none()
            && self.img_url.is_none()
            && self.video_url.is_none()
            && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::generate(),
            slug: ArticleSlug::new("sample-title").unwrap(),
            title: ArticleTitle::new("Sample title").unwrap(),
            subtitle: ArticleSubtitle::new("Sample subtitle").unwrap(),
            author: ArticleAuthor::new("Desk").unwrap(),
            content: ArticleContent::new("<p>body</p>").unwrap(),
            category: ArticleCategory::Politics,
            article_type: ArticleType::News,
            status: ArticleStatus::Active,
            img_url: None,
            video_url: None,
            tags: ArticleTags::new(vec!["sample".into()]).unwrap(),
            views: 7,
            date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_leaves_tags_and_views_alone() {
        let mut article = sample_article();
        let later = article.updated_at + Duration::seconds(30);
        let update = ArticleUpdate::new(article.id, later)
            .with_title(ArticleTitle::new("Renamed").unwrap())
            .with_status(ArticleStatus::Archived);

        article.apply(&update);

        assert_eq!(article.title.as_str(), "Renamed");
        assert_eq!(article.status, ArticleStatus::Archived);
        assert_eq!(article.tags.as_slice(), ["sample".to_string()]);
        assert_eq!(article.views, 7);
        assert_eq!(article.updated_at, later);
    }

    #[test]
    fn empty_update_is_detected() {
        let article = sample_article();
        let update = ArticleUpdate::new(article.id, article.updated_at);
        assert!(update.is_empty());
        assert!(!update.with_img_url("https://cdn.example/x.png").is_empty());
    }
}
