use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleId, ArticleReadRepository, ArticleSlug},
};

pub struct GetArticleQuery {
    pub term: String,
}

/// Two-phase lookup: identifier first, then the case- and whitespace-normalized slug.
pub async fn resolve_article(
    read_repo: &dyn ArticleReadRepository,
    term: &str,
) -> ApplicationResult<Article> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ApplicationError::validation("search term cannot be empty"));
    }

    if let Ok(id) = ArticleId::parse(term) {
        if let Some(article) = read_repo
            .find_by_id(id)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?
        {
            return Ok(article);
        }
    }

    let slug = ArticleSlug::new(term.to_lowercase())?;
    read_repo
        .find_by_slug(&slug)
        .await
        .map_err(|err| ApplicationError::from(err).flatten())?
        .ok_or_else(|| ApplicationError::not_found(format!("no article matches `{term}`")))
}

impl ArticleQueryService {
    pub async fn get_article(&self, query: GetArticleQuery) -> ApplicationResult<ArticleDto> {
        let article = resolve_article(self.read_repo.as_ref(), &query.term).await?;
        Ok(article.into())
    }
}
