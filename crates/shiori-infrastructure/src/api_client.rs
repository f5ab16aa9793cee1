//! Authenticated HTTP client.
//!
//! Thin wrapper around `reqwest::Client` that prefixes a fixed base URL and
//! attaches the stored session token as a bearer credential on every request,
//! the way the original client hung an interceptor on its axios instance.

use shiori_core::config::ClientConfig;
use shiori_core::session::TokenStore;
use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

/// HTTP client bound to the backend base URL.
///
/// Before each outbound request the current token is read from the store; if
/// one is present it is sent as `Authorization: Bearer <token>`, otherwise
/// the request goes out unauthenticated. Responses and errors are handed back
/// untransformed: status checking and body decoding are the caller's job.
/// The store is only ever read here, never written.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a new client for the configured backend.
    pub fn new(config: &ClientConfig, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token_store.load().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a GET request to `path` (e.g. `/api/articles/`).
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        let builder = self.client.get(self.url(path));
        self.authorize(builder).await.send().await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<Response> {
        let builder = self.client.post(self.url(path)).json(body);
        self.authorize(builder).await.send().await
    }

    /// Sends a POST request with a URL-encoded form body.
    ///
    /// The token endpoint expects `application/x-www-form-urlencoded`
    /// credentials rather than JSON.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &T,
    ) -> reqwest::Result<Response> {
        let builder = self.client.post(self.url(path)).form(form);
        self.authorize(builder).await.send().await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<Response> {
        let builder = self.client.patch(self.url(path)).json(body);
        self.authorize(builder).await.send().await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: &str) -> reqwest::Result<Response> {
        let builder = self.client.delete(self.url(path));
        self.authorize(builder).await.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiori_core::session::MemoryTokenStore;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://api.test/");
        let client = ApiClient::new(&config, Arc::new(MemoryTokenStore::new()));
        assert_eq!(client.url("/api/tags/"), "http://api.test/api/tags/");
    }
}
