use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::article::{
    Article, ArticleCategory, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, NewArticle, PageRequest, SearchHits,
};
use crate::domain::errors::{DomainError, DomainResult};

const TITLE_WEIGHT: u32 = 4;
const TAG_WEIGHT: u32 = 4;
const SUBTITLE_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 1;

/// Process-local article store with the same contract as the Postgres one.
///
/// Search requires every query term to occur somewhere in the article and ranks by
/// weighted term frequency (title and tags weigh the most, content the least).
#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: RwLock<HashMap<ArticleId, Article>>,
}

impl InMemoryArticleRepository {
    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, HashMap<ArticleId, Article>>> {
        self.articles
            .read()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, HashMap<ArticleId, Article>>> {
        self.articles
            .write()
            .map_err(|_| DomainError::Persistence("article store lock poisoned".into()))
    }
}

fn newest_first(a: &Article, b: &Article) -> std::cmp::Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.as_uuid().cmp(&a.id.as_uuid()))
}

fn paginate(articles: Vec<Article>, page: PageRequest) -> Vec<Article> {
    articles
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn occurrences(text: &str, term: &str) -> u32 {
    let count = tokens(text).filter(|t| t == term).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn score(article: &Article, terms: &[String]) -> Option<u32> {
    let mut total = 0u32;
    for term in terms {
        let tag_hits: u32 = article
            .tags
            .as_slice()
            .iter()
            .map(|tag| occurrences(tag, term))
            .sum();
        let term_score = occurrences(article.title.as_str(), term) * TITLE_WEIGHT
            + tag_hits * TAG_WEIGHT
            + occurrences(article.subtitle.as_str(), term) * SUBTITLE_WEIGHT
            + occurrences(article.content.as_str(), term) * CONTENT_WEIGHT;
        if term_score == 0 {
            return None;
        }
        total = total.saturating_add(term_score);
    }
    Some(total)
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut store = self.write()?;
        if store.values().any(|existing| existing.slug == article.slug) {
            return Err(DomainError::DuplicateKey(format!(
                "slug `{}` already exists",
                article.slug
            )));
        }

        let NewArticle {
            slug,
            title,
            subtitle,
            author,
            content,
            category,
            article_type,
            status,
            img_url,
            video_url,
            tags,
            date,
            created_at,
        } = article;
        let created = Article {
            id: ArticleId::generate(),
            slug,
            title,
            subtitle,
            author,
            content,
            category,
            article_type,
            status,
            img_url,
            video_url,
            tags,
            views: 0,
            date,
            created_at,
            updated_at: created_at,
        };
        store.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut store = self.write()?;
        if let Some(slug) = &update.slug {
            if store
                .values()
                .any(|existing| existing.id != update.id && &existing.slug == slug)
            {
                return Err(DomainError::DuplicateKey(format!("slug `{slug}` already exists")));
            }
        }

        let article = store
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.apply(&update);
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<Article> {
        let mut store = self.write()?;
        let article = store
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.views = article.views.saturating_add(1);
        Ok(article.clone())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self.read()?.values().find(|a| &a.slug == slug).cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
        category: Option<ArticleCategory>,
    ) -> DomainResult<Vec<Article>> {
        let mut matching: Vec<Article> = self
            .read()?
            .values()
            .filter(|a| category.is_none_or(|c| a.category == c))
            .cloned()
            .collect();
        matching.sort_by(newest_first);
        Ok(paginate(matching, page))
    }

    async fn search(&self, query: &str, page: PageRequest) -> DomainResult<SearchHits> {
        let terms: Vec<String> = tokens(query).collect();
        if terms.is_empty() {
            return Ok(SearchHits {
                articles: Vec::new(),
                total: 0,
            });
        }

        let mut scored: Vec<(u32, Article)> = self
            .read()?
            .values()
            .filter_map(|a| score(a, &terms).map(|s| (s, a.clone())))
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| newest_first(a, b)));

        let total = scored.len() as u64;
        let articles = paginate(scored.into_iter().map(|(_, a)| a).collect(), page);
        Ok(SearchHits { articles, total })
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Article>> {
        let mut matching: Vec<Article> = self
            .read()?
            .values()
            .filter(|a| a.date >= start && a.date <= end)
            .cloned()
            .collect();
        matching.sort_by(newest_first);
        Ok(matching)
    }
}
