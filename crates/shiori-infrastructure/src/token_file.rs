//! File-backed token store.
//!
//! Persists the session token in a single file under the shiori config
//! directory, the client-side analogue of browser local storage under a
//! fixed key.

use crate::paths::ShioriPaths;
use async_trait::async_trait;
use shiori_core::error::{Result, ShioriError};
use shiori_core::session::TokenStore;
use std::path::{Path, PathBuf};

/// Token store persisting to `<config dir>/shiori/access_token`.
///
/// An unreadable or absent file loads as "no token" so a corrupted slot
/// degrades to an unauthenticated session rather than an error, matching
/// the semantics of reading an absent local-storage key.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location.
    pub fn default_location() -> Result<Self> {
        Self::new(None)
    }

    /// Creates a store rooted at a custom base directory (for testing).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = ShioriPaths::new(base_dir)
            .token_file()
            .map_err(|e| ShioriError::storage(e.to_string()))?;
        Ok(Self { path })
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<String> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    async fn store(&self, token: &str) -> Result<()> {
        self.ensure_parent_dir().await?;
        tokio::fs::write(&self.path, token).await?;

        // Token grants account access, keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions).await?;
        }

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileTokenStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(Some(temp_dir.path())).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_load_without_store_is_none() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_store_and_load_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        store.store("tok-abc").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn test_store_overwrites_previous_token() {
        let (store, _temp_dir) = create_test_store();
        store.store("first").await.unwrap();
        store.store("second").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_clear_removes_token() {
        let (store, _temp_dir) = create_test_store();
        store.store("tok-abc").await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_absent_token_is_ok() {
        let (store, _temp_dir) = create_test_store();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_whitespace_only_file_loads_as_none() {
        let (store, _temp_dir) = create_test_store();
        store.store("  \n").await.unwrap();
        assert!(store.load().await.is_none());
    }
}
