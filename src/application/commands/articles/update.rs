// src/application/commands/articles/update.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        queries::articles::resolve_article,
    },
    domain::article::{
        ArticleAuthor, ArticleContent, ArticleId, ArticleSlug, ArticleSubtitle, ArticleTitle,
        ArticleUpdate,
    },
};

/// Partial edit. `tags` and `views` are deliberately absent.
#[derive(Debug, Default)]
pub struct UpdateArticleCommand {
    pub term: String,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub article_type: Option<String>,
    pub status: Option<String>,
    pub img_url: Option<String>,
    pub video_url: Option<String>,
    pub date: Option<String>,
}

impl ArticleCommandService {
    pub async fn update_article(&self, command: UpdateArticleCommand) -> ApplicationResult<ArticleDto> {
        let article = resolve_article(self.read_repo.as_ref(), &command.term).await?;
        self.apply_update(article.id, command)
            .await
            .map_err(ApplicationError::flatten)
    }

    async fn apply_update(
        &self,
        id: ArticleId,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut update = ArticleUpdate::new(id, self.clock.now());

        if let Some(raw) = command.slug {
            let slug = ArticleSlug::normalize(&raw)?;
            self.slug_service.ensure_available(&slug, id).await?;
            update = update.with_slug(slug);
        }
        if let Some(title) = command.title {
            update = update.with_title(ArticleTitle::new(title)?);
        }
        if let Some(subtitle) = command.subtitle {
            update = update.with_subtitle(ArticleSubtitle::new(subtitle)?);
        }
        if let Some(author) = command.author {
            update = update.with_author(ArticleAuthor::new(author)?);
        }
        if let Some(content) = command.content {
            update = update.with_content(ArticleContent::new(content)?);
        }
        if let Some(category) = command.category {
            update = update.with_category(category.parse()?);
        }
        if let Some(article_type) = command.article_type {
            update = update.with_article_type(article_type.parse()?);
        }
        if let Some(status) = command.status {
            update = update.with_status(status.parse()?);
        }
        if let Some(url) = command.img_url.filter(|u| !u.trim().is_empty()) {
            update = update.with_img_url(url.trim());
        }
        if let Some(url) = command.video_url.filter(|u| !u.trim().is_empty()) {
            update = update.with_video_url(url.trim());
        }
        if let Some(date) = command.date {
            update = update.with_date(self.calendar.parse_instant(&date)?);
        }

        if update.is_empty() {
            return Err(ApplicationError::validation("no updatable fields supplied"));
        }

        let updated = self.write_repo.update(update).await?;
        tracing::info!(article_id = %updated.id, slug = %updated.slug, "article updated");
        Ok(updated.into())
    }
}
