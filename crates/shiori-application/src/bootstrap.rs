//! Production wiring for the client.
//!
//! Builds the concrete component graph once at application start: config,
//! token store, API client, repositories, and the use cases on top of them.
//! Frontends hold an `AppContext` and never construct infrastructure
//! themselves.

use crate::auth_usecase::AuthUseCase;
use crate::library::Library;
use crate::session_context::SessionContext;
use shiori_core::config::ClientConfig;
use shiori_core::error::Result;
use shiori_core::session::TokenStore;
use shiori_infrastructure::{
    ApiArticleRepository, ApiAuthGateway, ApiClient, ApiTagRepository, ConfigService,
    FileTokenStore,
};
use std::sync::Arc;

/// The wired application components shared by every frontend command.
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<SessionContext>,
    pub auth: AuthUseCase,
    pub library: Arc<Library>,
}

impl AppContext {
    /// Builds the production graph.
    ///
    /// Loads (or initializes) `config.toml`, then wires the file token
    /// store, the authenticated API client, and the use cases. An explicit
    /// `base_url` overrides the configured one without rewriting the file.
    pub async fn build(base_url_override: Option<String>) -> Result<AppContext> {
        let mut config = ConfigService::default_location().load_or_init().await?;
        if let Some(base_url) = base_url_override {
            config = ClientConfig::new(base_url);
        }

        let token_store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::default_location()?);
        let session = Arc::new(SessionContext::new(token_store.clone()).await);

        let client = ApiClient::new(&config, token_store);
        let auth = AuthUseCase::new(Arc::new(ApiAuthGateway::new(client.clone())), session.clone());
        let library = Arc::new(Library::new(
            Arc::new(ApiArticleRepository::new(client.clone())),
            Arc::new(ApiTagRepository::new(client)),
        ));

        Ok(AppContext {
            config,
            session,
            auth,
            library,
        })
    }
}
