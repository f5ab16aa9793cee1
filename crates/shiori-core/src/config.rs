//! Client configuration.

use serde::{Deserialize, Serialize};

/// Default backend endpoint, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL, trimming any
    /// trailing slash so path joining stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
