//! Article and tag repository traits.
//!
//! Define the interface to the remote backend that owns article and tag
//! persistence. The client never stores either entity locally.

use super::model::{Article, NewArticle, Tag};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for article persistence.
///
/// This trait decouples the client's presentation logic from the concrete
/// transport (the REST backend in production, in-memory mocks in tests).
///
/// # Implementation Notes
///
/// Implementations must not cache: every call is expected to hit the
/// authoritative store, because the client re-fetches wholesale after each
/// mutation instead of patching local state.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Lists all articles, each with its tags nested, in server order.
    async fn list(&self) -> Result<Vec<Article>>;

    /// Creates an article and returns it with its server-assigned id.
    async fn create(&self, article: &NewArticle) -> Result<Article>;

    /// Partially updates one article's read flag, returning the updated row.
    async fn set_read_status(&self, id: i64, is_read: bool) -> Result<Article>;

    /// Deletes the article with the given id.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// An abstract repository for tag persistence.
///
/// Tags are created and listed by this client, never renamed or deleted;
/// name uniqueness is the server's concern.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all known tags.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Creates a tag and returns it with its server-assigned id.
    async fn create(&self, name: &str) -> Result<Tag>;
}
