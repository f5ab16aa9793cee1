//! Auth gateway trait.
//!
//! Token issuance and account creation live entirely on the server; the
//! client only carries the opaque token it gets back.

use super::model::Credentials;
use crate::error::Result;
use async_trait::async_trait;

/// Gateway to the backend's authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for an access token.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the opaque access token
    /// - `Err(_)`: wrong credentials or transport failure
    async fn login(&self, credentials: &Credentials) -> Result<String>;

    /// Creates a new account.
    ///
    /// Field-level validation errors from the server (e.g. a taken username)
    /// are surfaced as `ShioriError::Validation` with the server's first
    /// message for the `username` field; any other failure shape maps to a
    /// generic error.
    async fn register(&self, credentials: &Credentials) -> Result<()>;
}
