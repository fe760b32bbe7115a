use super::{ArticleQueryService, list::normalize_limit};
use crate::{
    application::{
        dto::{ArticleDto, SearchPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::PageRequest,
};

const DEFAULT_SEARCH_LIMIT: u32 = 9;

pub struct SearchArticlesQuery {
    pub query: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ArticleQueryService {
    /// Relevance-ranked search. An empty page is `NotFound`, including an offset past the
    /// last match.
    pub async fn search_articles(&self, query: SearchArticlesQuery) -> ApplicationResult<SearchPage<ArticleDto>> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation("search query cannot be empty"));
        }

        let page = PageRequest::new(
            normalize_limit(query.limit, DEFAULT_SEARCH_LIMIT),
            query.offset.unwrap_or(0),
        );
        let hits = self
            .read_repo
            .search(text, page)
            .await
            .map_err(|err| ApplicationError::from(err).flatten())?;
        if hits.articles.is_empty() {
            return Err(ApplicationError::not_found(format!("no articles match `{text}`")));
        }

        Ok(SearchPage {
            items: hits.articles.into_iter().map(Into::into).collect(),
            total: hits.total,
            limit: page.limit,
            offset: page.offset,
        })
    }
}
