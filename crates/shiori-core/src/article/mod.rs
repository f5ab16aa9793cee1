//! Article domain: models and repository traits.

pub mod model;
pub mod repository;

pub use model::{Article, ArticleDraft, NewArticle, NewTag, ReadStatusPatch, Tag};
pub use repository::{ArticleRepository, TagRepository};
