//! Login, registration, and logout orchestration.
//!
//! Thin coordination between the auth gateway and the session context: the
//! gateway talks to the backend, the context owns the token and the login
//! state every other component observes.

use crate::session_context::SessionContext;
use shiori_core::auth::{AuthGateway, Credentials};
use shiori_core::error::Result;
use std::sync::Arc;

/// Use case for account and session operations.
pub struct AuthUseCase {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionContext>,
}

impl AuthUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionContext>) -> Self {
        Self { gateway, session }
    }

    /// Exchanges credentials for a token and stores it through the session
    /// context. The frontend navigates to the article view on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(username, password);
        let token = self.gateway.login(&credentials).await.map_err(|e| {
            tracing::error!(error = %e, "Login failed");
            e
        })?;
        self.session.login(&token).await
    }

    /// Creates a new account. No token is issued; the frontend sends the
    /// user to the login view afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        let credentials = Credentials::new(username, password);
        self.gateway.register(&credentials).await.map_err(|e| {
            tracing::error!(error = %e, "Registration failed");
            e
        })
    }

    /// Ends the session locally by clearing the stored token. The server is
    /// not informed.
    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await
    }
}
