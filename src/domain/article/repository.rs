use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleCategory, ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

/// One page of ranked search results plus the total number of matches.
#[derive(Debug, Clone)]
pub struct SearchHits {
    pub articles: Vec<Article>,
    pub total: u64,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Fails with `DomainError::DuplicateKey` when the slug is already taken.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
    /// Atomic increment-and-fetch of the view counter.
    async fn increment_views(&self, id: ArticleId) -> DomainResult<Article>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Newest-first page, optionally restricted to one category.
    async fn list(
        &self,
        page: PageRequest,
        category: Option<ArticleCategory>,
    ) -> DomainResult<Vec<Article>>;
    /// Relevance-ordered full-text search over title, subtitle, content and tags.
    async fn search(&self, query: &str, page: PageRequest) -> DomainResult<SearchHits>;
    /// Articles whose editorial date lies in `[start, end]`, newest first.
    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Article>>;
}
