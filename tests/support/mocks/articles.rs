use async_trait::async_trait;
use newsdesk_core::domain::article::{
    Article, ArticleId, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use newsdesk_core::domain::errors::{DomainError, DomainResult};

/// Write side whose every call fails as if the database connection dropped.
pub struct BrokenWriteRepository;

fn unavailable<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("connection closed".into()))
}

#[async_trait]
impl ArticleWriteRepository for BrokenWriteRepository {
    async fn insert(&self, _article: NewArticle) -> DomainResult<Article> {
        unavailable()
    }

    async fn update(&self, _update: ArticleUpdate) -> DomainResult<Article> {
        unavailable()
    }

    async fn delete(&self, _id: ArticleId) -> DomainResult<()> {
        unavailable()
    }

    async fn increment_views(&self, _id: ArticleId) -> DomainResult<Article> {
        unavailable()
    }
}
