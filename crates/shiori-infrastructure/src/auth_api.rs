//! REST-backed auth gateway.
//!
//! Login goes to `POST /api/token` with URL-encoded credentials and yields
//! `{access_token}`; registration goes to `POST /api/register/` as JSON and
//! reports field errors in the server's `{field: [message, ...]}` shape.

use crate::api_client::ApiClient;
use crate::response::check;
use async_trait::async_trait;
use shiori_core::auth::{AuthGateway, Credentials, TokenResponse};
use shiori_core::error::{Result, ShioriError};

const TOKEN_PATH: &str = "/api/token";
const REGISTER_PATH: &str = "/api/register/";

/// `AuthGateway` backed by the REST API.
#[derive(Clone)]
pub struct ApiAuthGateway {
    client: ApiClient,
}

impl ApiAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for ApiAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response = check(self.client.post_form(TOKEN_PATH, credentials).await?).await?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let result = check(self.client.post(REGISTER_PATH, credentials).await?).await;
        match result {
            Ok(_) => Ok(()),
            Err(ShioriError::Http { status, message }) => {
                Err(unpack_field_error(status, &message))
            }
            Err(other) => Err(other),
        }
    }
}

/// Extracts the first `username` field error from a registration failure body.
///
/// Bodies of any other shape fall back to the generic HTTP error.
fn unpack_field_error(status: u16, body: &str) -> ShioriError {
    let first_username_error = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("username")
                .and_then(|field| field.as_array())
                .and_then(|messages| messages.first())
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        });

    match first_username_error {
        Some(message) => ShioriError::validation(message),
        None => ShioriError::http(status, body),
    }
}
