//! Explicit session state shared across the application.
//!
//! The original client derived "logged in" by reading the token out of
//! ambient browser storage wherever it happened to need it, so a login or
//! logout only became visible after a full remount. `SessionContext` is the
//! replacement: one object created at application start, injected into every
//! component with auth-aware behavior, holding the single source of truth
//! and broadcasting changes over a watch channel.

use shiori_core::error::Result;
use shiori_core::session::TokenStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Single source of truth for the login state.
///
/// All token writes go through here; the wrapped store is the only
/// persistence and the watch channel is the only change-propagation path.
pub struct SessionContext {
    token_store: Arc<dyn TokenStore>,
    logged_in: watch::Sender<bool>,
}

impl SessionContext {
    /// Creates the context, reading the stored token once to seed the state.
    pub async fn new(token_store: Arc<dyn TokenStore>) -> Self {
        let initial = token_store.load().await.is_some();
        let (logged_in, _) = watch::channel(initial);
        Self {
            token_store,
            logged_in,
        }
    }

    /// Current login state.
    pub fn is_logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    /// Subscribes to login-state changes.
    ///
    /// Receivers see every login/logout without needing to re-read storage.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    /// Stores a freshly issued token and flips the state to logged in.
    pub async fn login(&self, token: &str) -> Result<()> {
        self.token_store.store(token).await?;
        self.logged_in.send_replace(true);
        Ok(())
    }

    /// Clears the stored token and flips the state to logged out.
    ///
    /// Local-only session termination: no server-side call is made.
    pub async fn logout(&self) -> Result<()> {
        self.token_store.clear().await?;
        self.logged_in.send_replace(false);
        Ok(())
    }
}
