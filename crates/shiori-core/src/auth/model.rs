//! Auth value objects.

use serde::{Deserialize, Serialize};

/// Username/password pair for login and registration.
///
/// Login submits these URL-encoded (the token endpoint expects form data);
/// registration submits them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Response body of the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
