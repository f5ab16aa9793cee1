pub mod api_client;
pub mod article_api;
pub mod auth_api;
pub mod config_service;
pub mod paths;
mod response;
pub mod token_file;

pub use api_client::ApiClient;
pub use article_api::{ApiArticleRepository, ApiTagRepository};
pub use auth_api::ApiAuthGateway;
pub use config_service::ConfigService;
pub use token_file::FileTokenStore;
