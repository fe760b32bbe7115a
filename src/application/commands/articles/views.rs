// src/application/commands/articles/views.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct IncrementViewsCommand {
    pub id: String,
}

impl ArticleCommandService {
    /// Atomic increment-and-fetch. An id that cannot exist is reported as missing.
    pub async fn increment_views(&self, command: IncrementViewsCommand) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::parse(&command.id)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let article = self
            .write_repo
            .increment_views(id)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;
        Ok(article.into())
    }
}
