//! Error types for the Shiori client.

use thiserror::Error;

/// A shared error type for the entire Shiori client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ShioriError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Input rejected before any request was sent (empty required field etc.)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a usable response (connect, timeout, decode)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Token/config storage error (file system operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// A matching mutation is already in flight and the repeat was ignored
    #[error("Operation already in flight: {action}")]
    Busy { action: String },

    /// The component was disposed before the operation could apply its result
    #[error("Component closed")]
    Closed,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShioriError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Busy error
    pub fn busy(action: impl Into<String>) -> Self {
        Self::Busy {
            action: action.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this error came from the network layer (transport or HTTP)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    /// Returns the HTTP status code if this is an Http error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for ShioriError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ShioriError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ShioriError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for ShioriError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ShioriError>`.
pub type Result<T> = std::result::Result<T, ShioriError>;
