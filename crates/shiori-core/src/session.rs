//! Session token storage trait.
//!
//! Defines the interface for the persistent client-side token slot, the
//! analogue of browser local storage under a fixed key. The token is opaque:
//! the client never decodes or validates it, presence alone means "logged in"
//! for UI purposes.

use crate::error::Result;
use async_trait::async_trait;

/// Fixed storage key for the access token.
pub const TOKEN_KEY: &str = "access_token";

/// Persistent storage slot for the session token.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - The backing file has appropriate permissions (e.g., 600 on Unix)
/// - The token is never logged or included in error messages
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the stored token.
    ///
    /// Returns `None` when no token is stored or the slot is unreadable;
    /// a missing token is not an error, it just means unauthenticated.
    async fn load(&self) -> Option<String>;

    /// Stores a token, replacing any previous value.
    async fn store(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Removing an absent token is not an error.
    async fn clear(&self) -> Result<()>;
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: tokio::sync::RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: tokio::sync::RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.is_none());

        store.store("tok-123").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("tok-123"));

        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }
}
