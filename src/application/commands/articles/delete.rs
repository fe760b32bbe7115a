// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    queries::articles::resolve_article,
};

pub struct DeleteArticleCommand {
    pub term: String,
}

impl ArticleCommandService {
    pub async fn delete_article(&self, command: DeleteArticleCommand) -> ApplicationResult<()> {
        let article = resolve_article(self.read_repo.as_ref(), &command.term).await?;
        self.write_repo
            .delete(article.id)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;
        tracing::info!(article_id = %article.id, slug = %article.slug, "article deleted");
        Ok(())
    }
}
