//! REST-backed article and tag repositories.
//!
//! Endpoint layout (JSON bodies, trailing slashes as served):
//!
//! ```text
//! GET    /api/articles/        list articles (tags nested)
//! POST   /api/articles/        create article {url, title, memo, tag_ids}
//! PATCH  /api/articles/{id}/   partial update {is_read}
//! DELETE /api/articles/{id}/   delete article
//! GET    /api/tags/            list tags
//! POST   /api/tags/            create tag {name}
//! ```

use crate::api_client::ApiClient;
use crate::response::check;
use async_trait::async_trait;
use shiori_core::article::{Article, ArticleRepository, NewArticle, NewTag, ReadStatusPatch, Tag, TagRepository};
use shiori_core::error::Result;

const ARTICLES_PATH: &str = "/api/articles/";
const TAGS_PATH: &str = "/api/tags/";

/// `ArticleRepository` backed by the REST API.
#[derive(Clone)]
pub struct ApiArticleRepository {
    client: ApiClient,
}

impl ApiArticleRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn article_path(id: i64) -> String {
        format!("{}{}/", ARTICLES_PATH, id)
    }
}

#[async_trait]
impl ArticleRepository for ApiArticleRepository {
    async fn list(&self) -> Result<Vec<Article>> {
        let response = check(self.client.get(ARTICLES_PATH).await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, article: &NewArticle) -> Result<Article> {
        let response = check(self.client.post(ARTICLES_PATH, article).await?).await?;
        Ok(response.json().await?)
    }

    async fn set_read_status(&self, id: i64, is_read: bool) -> Result<Article> {
        let patch = ReadStatusPatch { is_read };
        let response = check(self.client.patch(&Self::article_path(id), &patch).await?).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        check(self.client.delete(&Self::article_path(id)).await?).await?;
        Ok(())
    }
}

/// `TagRepository` backed by the REST API.
#[derive(Clone)]
pub struct ApiTagRepository {
    client: ApiClient,
}

impl ApiTagRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagRepository for ApiTagRepository {
    async fn list(&self) -> Result<Vec<Tag>> {
        let response = check(self.client.get(TAGS_PATH).await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, name: &str) -> Result<Tag> {
        let body = NewTag {
            name: name.to_string(),
        };
        let response = check(self.client.post(TAGS_PATH, &body).await?).await?;
        Ok(response.json().await?)
    }
}
