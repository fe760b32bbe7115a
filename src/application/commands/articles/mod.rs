// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod service;
mod update;
mod views;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder, PublicationStage};
pub use delete::DeleteArticleCommand;
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
pub use views::IncrementViewsCommand;
