pub mod calendar;
pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use calendar::EditorialCalendar;
pub use entity::{Article, ArticleUpdate, NewArticle};
pub use repository::{ArticleReadRepository, ArticleWriteRepository, PageRequest, SearchHits};
pub use value_objects::{
    ArticleAuthor, ArticleCategory, ArticleContent, ArticleId, ArticleSlug, ArticleStatus,
    ArticleSubtitle, ArticleTags, ArticleTitle, ArticleType, MAX_TAGS,
};
