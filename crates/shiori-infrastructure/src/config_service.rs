//! Client configuration loading.
//!
//! Reads `config.toml` from the shiori config directory, creating it with
//! defaults on first run so the user has a file to edit.

use crate::paths::ShioriPaths;
use shiori_core::config::ClientConfig;
use shiori_core::error::{Result, ShioriError};
use std::path::Path;

/// Service for loading and persisting the client configuration.
pub struct ConfigService {
    paths: ShioriPaths,
}

impl ConfigService {
    /// Creates a service using the default config location.
    pub fn default_location() -> Self {
        Self::new(None)
    }

    /// Creates a service rooted at a custom base directory (for testing).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            paths: ShioriPaths::new(base_dir),
        }
    }

    /// Loads the configuration, writing the default file if none exists.
    pub async fn load_or_init(&self) -> Result<ClientConfig> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| ShioriError::storage(e.to_string()))?;

        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => toml::from_str(&raw).map_err(|e| ShioriError::Serialization {
                format: "TOML".to_string(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = ClientConfig::default();
                self.save(&config).await?;
                tracing::info!(path = %path.display(), "Created default configuration");
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the configuration back to disk.
    pub async fn save(&self, config: &ClientConfig) -> Result<()> {
        let path = self
            .paths
            .config_file()
            .map_err(|e| ShioriError::storage(e.to_string()))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = toml::to_string_pretty(config).map_err(|e| ShioriError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }
}
