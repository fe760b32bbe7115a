use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, OffsetPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleCategory, PageRequest},
};

pub(super) const DEFAULT_LIMIT: u32 = 10;
pub(super) const MAX_LIMIT: u32 = 100;

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub category: Option<String>,
}

impl ArticleQueryService {
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<OffsetPage<ArticleDto>> {
        let category = match query.category.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<ArticleCategory>()?),
            _ => None,
        };
        self.page(query.limit, query.offset, category).await
    }

    /// Category-filtered listing; the category is mandatory here.
    pub async fn list_by_category(&self, query: ListArticlesQuery) -> ApplicationResult<OffsetPage<ArticleDto>> {
        let raw = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApplicationError::validation("category is required"))?;
        let category = raw.parse::<ArticleCategory>()?;
        self.page(query.limit, query.offset, Some(category)).await
    }

    async fn page(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        category: Option<ArticleCategory>,
    ) -> ApplicationResult<OffsetPage<ArticleDto>> {
        let page = PageRequest::new(normalize_limit(limit, DEFAULT_LIMIT), offset.unwrap_or(0));
        let records = self
            .read_repo
            .list(page, category)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;
        let items = records.into_iter().map(Into::into).collect();
        Ok(OffsetPage::new(items, page.limit, page.offset))
    }
}

pub(super) fn normalize_limit(limit: Option<u32>, default: u32) -> u32 {
    match limit {
        None | Some(0) => default,
        Some(value) => value.min(MAX_LIMIT),
    }
}
