// src/domain/article/services/mod.rs
mod slug;
mod tags;

pub use slug::ArticleSlugService;
pub use tags::TagExtractor;
