use std::sync::Arc;

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::errors::{DomainError, DomainResult};

/// Domain service responsible for producing unique slugs for articles.
///
/// A title whose slug is already taken gets the current epoch milliseconds appended
/// (`<slug>-<epoch-ms>`). There is exactly one existence check; the store's unique
/// index rejects the rare collision that survives it.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            generator,
            clock,
        }
    }

    pub async fn assign(&self, title: &ArticleTitle) -> DomainResult<ArticleSlug> {
        let stamp = self.clock.now().timestamp_millis();
        let base = self.generator.slugify(title.as_str());
        let slug = if base.is_empty() {
            ArticleSlug::new(format!("article-{stamp}"))?
        } else {
            ArticleSlug::new(base)?
        };

        if self.read_repo.find_by_slug(&slug).await?.is_some() {
            let suffixed = slug.with_suffix(stamp);
            tracing::debug!(base = %slug, slug = %suffixed, "slug taken, appending timestamp");
            return Ok(suffixed);
        }

        Ok(slug)
    }

    /// Ensures `slug` is free or already owned by `owner`.
    pub async fn ensure_available(&self, slug: &ArticleSlug, owner: ArticleId) -> DomainResult<()> {
        match self.read_repo.find_by_slug(slug).await? {
            Some(existing) if existing.id != owner => Err(DomainError::DuplicateKey(format!(
                "slug `{slug}` belongs to another article"
            ))),
            _ => Ok(()),
        }
    }
}
