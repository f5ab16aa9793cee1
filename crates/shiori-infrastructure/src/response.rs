//! Response status handling shared by the API-backed repositories.

use reqwest::Response;
use shiori_core::error::{Result, ShioriError};

/// Passes a success response through and turns any other status into
/// `ShioriError::Http`, using the response body as the message.
pub(crate) async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    Err(ShioriError::http(status.as_u16(), body))
}
