// src/application/commands/articles/create.rs
use std::fmt;

use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        ports::media::MediaBlob,
        services::media::MediaAttachments,
    },
    domain::{
        article::{
            ArticleAuthor, ArticleCategory, ArticleContent, ArticleStatus, ArticleSubtitle,
            ArticleTitle, ArticleType, NewArticle,
        },
        errors::DomainError,
    },
};

/// Steps of the publication pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationStage {
    MediaResolving,
    SlugAssigning,
    TagExtracting,
    Persisting,
    FanningOut,
    Done,
}

impl fmt::Display for PublicationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MediaResolving => "media_resolving",
            Self::SlugAssigning => "slug_assigning",
            Self::TagExtracting => "tag_extracting",
            Self::Persisting => "persisting",
            Self::FanningOut => "fanning_out",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

pub struct CreateArticleCommand {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: String,
    pub category: String,
    pub article_type: String,
    pub status: Option<String>,
    pub date: String,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub attachments: MediaAttachments,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    subtitle: Option<String>,
    author: Option<String>,
    content: Option<String>,
    category: Option<String>,
    article_type: Option<String>,
    status: Option<String>,
    date: Option<String>,
    img_url: Option<String>,
    video_url: Option<String>,
    attachments: MediaAttachments,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn article_type(mut self, article_type: impl Into<String>) -> Self {
        self.article_type = Some(article_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn img_url(mut self, url: impl Into<String>) -> Self {
        self.img_url = Some(url.into());
        self
    }

    pub fn video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn image(mut self, blob: MediaBlob) -> Self {
        self.attachments.image = Some(blob);
        self
    }

    pub fn video(mut self, blob: MediaBlob) -> Self {
        self.attachments.video = Some(blob);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            subtitle: self.subtitle.ok_or("subtitle is required")?,
            author: self.author.ok_or("author is required")?,
            content: self.content.ok_or("content is required")?,
            category: self.category.ok_or("category is required")?,
            article_type: self.article_type.ok_or("articleType is required")?,
            status: self.status,
            date: self.date.ok_or("date is required")?,
            img_url: self.img_url,
            video_url: self.video_url,
            attachments: self.attachments,
        })
    }
}

impl ArticleCommandService {
    /// Runs the full publication pipeline and returns the stored article.
    ///
    /// Anything failing before persistence aborts with nothing stored. Channel
    /// failures after persistence are logged and never reach the caller.
    pub async fn create_article(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let CreateArticleCommand {
            title,
            subtitle,
            author,
            content,
            category,
            article_type,
            status,
            date,
            img_url,
            video_url,
            attachments,
        } = command;

        let title = ArticleTitle::new(title)?;
        let subtitle = ArticleSubtitle::new(subtitle)?;
        let author = ArticleAuthor::new(author)?;
        let content = ArticleContent::new(content)?;
        let category: ArticleCategory = category.parse()?;
        let article_type: ArticleType = article_type.parse()?;
        let status = match status.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => ArticleStatus::default(),
        };
        let date = self.calendar.parse_instant(&date)?;

        stage(PublicationStage::MediaResolving);
        let media = self.media.resolve(attachments, img_url, video_url).await?;

        stage(PublicationStage::SlugAssigning);
        let slug = self
            .slug_service
            .assign(&title)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;

        stage(PublicationStage::TagExtracting);
        let tags = self.tags.extract(title.as_str(), content.as_str());

        stage(PublicationStage::Persisting);
        let new_article = NewArticle {
            slug,
            title,
            subtitle,
            author,
            content,
            category,
            article_type,
            status,
            img_url: media.img_url,
            video_url: media.video_url,
            tags,
            date,
            created_at: self.clock.now(),
        };
        let created = self.write_repo.insert(new_article).await.map_err(|err| match err {
            DomainError::DuplicateKey(detail) => {
                tracing::warn!(%detail, "slug collision survived disambiguation");
                ApplicationError::conflict("article already exists")
            }
            other => {
                tracing::error!(error = %other, "failed to persist article");
                ApplicationError::infrastructure("can't create article - check server logs")
            }
        })?;
        tracing::info!(article_id = %created.id, slug = %created.slug, "article created");

        stage(PublicationStage::FanningOut);
        let deliveries = self.fanout.dispatch(&created).await;
        let delivered = deliveries.iter().filter(|d| d.outcome.is_delivered()).count();
        if delivered < deliveries.len() {
            tracing::info!(
                article_id = %created.id,
                delivered,
                attempted = deliveries.len(),
                "article persisted with partial fan-out"
            );
        }

        stage(PublicationStage::Done);
        Ok(created.into())
    }
}

fn stage(stage: PublicationStage) {
    tracing::debug!(%stage, "publication pipeline");
}
