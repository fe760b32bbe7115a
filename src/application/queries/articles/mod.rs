mod by_date;
mod get;
mod list;
mod search;
mod service;

pub use by_date::ArticlesByDateQuery;
pub use get::{GetArticleQuery, resolve_article};
pub use list::ListArticlesQuery;
pub use search::SearchArticlesQuery;
pub use service::ArticleQueryService;
