//! Unified path management for shiori configuration files.
//!
//! All shiori configuration and session data live under one per-user config
//! directory so every storage mechanism resolves paths the same way.

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for shiori.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/shiori/            # Config directory
/// ├── config.toml              # Client configuration (backend base URL)
/// └── access_token             # Session token (fixed key, one opaque line)
/// ```
pub struct ShioriPaths {
    base_dir: Option<PathBuf>,
}

impl ShioriPaths {
    /// Creates a path resolver, optionally rooted at a custom base directory
    /// (used by tests to stay out of the real home directory).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the shiori configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/shiori/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("shiori"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the token file.
    ///
    /// The file name doubles as the fixed storage key for the session token.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn token_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(shiori_core::session::TOKEN_KEY))
    }
}
