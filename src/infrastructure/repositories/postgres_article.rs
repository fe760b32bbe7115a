// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleAuthor, ArticleCategory, ArticleContent, ArticleId, ArticleReadRepository,
    ArticleSlug, ArticleSubtitle, ArticleTags, ArticleTitle, ArticleUpdate,
    ArticleWriteRepository, NewArticle, PageRequest, SearchHits,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ARTICLE_COLUMNS: &str = "id, slug, title, subtitle, author, content, category, article_type, status, \
     img_url, video_url, tags, views, date, created_at, updated_at";

const NEWEST_FIRST: &str = " ORDER BY date DESC, created_at DESC, id DESC";

/// Postgres-backed article store. Slug uniqueness is enforced by `articles_slug_key`
/// and full-text search runs against the generated `search` column.
#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: Uuid,
    slug: String,
    title: String,
    subtitle: String,
    author: String,
    content: String,
    category: String,
    article_type: String,
    status: String,
    img_url: Option<String>,
    video_url: Option<String>,
    tags: Vec<String>,
    views: i64,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::from(row.id),
            slug: ArticleSlug::new(row.slug)?,
            title: ArticleTitle::new(row.title)?,
            subtitle: ArticleSubtitle::new(row.subtitle)?,
            author: ArticleAuthor::new(row.author)?,
            content: ArticleContent::new(row.content)?,
            category: row.category.parse()?,
            article_type: row.article_type.parse()?,
            status: row.status.parse()?,
            img_url: row.img_url,
            video_url: row.video_url,
            tags: ArticleTags::new(row.tags)?,
            views: u64::try_from(row.views)
                .map_err(|_| DomainError::Persistence("negative view counter".into()))?,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_articles(rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    rows.into_iter().map(Article::try_from).collect()
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
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

        let tags = tags.into_inner();
        let tags_text = tags.join(" ");
        let sql = format!(
            "INSERT INTO articles (id, slug, title, subtitle, author, content, category, article_type, status,
                                   img_url, video_url, tags, tags_text, views, date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 0, $14, $15, $15)
             RETURNING {ARTICLE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(ArticleId::generate().as_uuid())
            .bind(slug.as_str())
            .bind(title.as_str())
            .bind(subtitle.as_str())
            .bind(author.as_str())
            .bind(content.as_str())
            .bind(category.as_str())
            .bind(article_type.as_str())
            .bind(status.as_str())
            .bind(img_url)
            .bind(video_url)
            .bind(&tags)
            .bind(tags_text)
            .bind(date)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
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
            date,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }
        if let Some(subtitle) = subtitle {
            builder.push(", subtitle = ");
            builder.push_bind(subtitle.into_inner());
        }
        if let Some(author) = author {
            builder.push(", author = ");
            builder.push_bind(author.into_inner());
        }
        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content.into_inner());
        }
        if let Some(category) = category {
            builder.push(", category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(article_type) = article_type {
            builder.push(", article_type = ");
            builder.push_bind(article_type.as_str());
        }
        if let Some(status) = status {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(img_url) = img_url {
            builder.push(", img_url = ");
            builder.push_bind(img_url);
        }
        if let Some(video_url) = video_url {
            builder.push(", video_url = ");
            builder.push_bind(video_url);
        }
        if let Some(date) = date {
            builder.push(", date = ");
            builder.push_bind(date);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.as_uuid());
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<Article> {
        let sql = format!(
            "UPDATE articles SET views = views + 1 WHERE id = $1 RETURNING {ARTICLE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(
        &self,
        page: PageRequest,
        category: Option<ArticleCategory>,
    ) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM articles");
        if let Some(category) = category {
            builder.push(" WHERE category = ");
            builder.push_bind(category.as_str());
        }
        builder.push(NEWEST_FIRST);
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(page.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(page.offset));

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        into_articles(rows)
    }

    async fn search(&self, query: &str, page: PageRequest) -> DomainResult<SearchHits> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM articles WHERE search @@ websearch_to_tsquery('simple', $1)",
        )
        .bind(query)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if total == 0 {
            return Ok(SearchHits {
                articles: Vec::new(),
                total: 0,
            });
        }

        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles, websearch_to_tsquery('simple', $1) AS q
             WHERE search @@ q
             ORDER BY ts_rank(search, q) DESC, date DESC, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(query)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(SearchHits {
            articles: into_articles(rows)?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE date BETWEEN $1 AND $2{NEWEST_FIRST}"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        into_articles(rows)
    }
}
