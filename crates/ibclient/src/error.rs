//! WAPI client errors

use thiserror::Error;

/// Errors that can occur when interacting with the WAPI
#[derive(Debug, Error)]
pub enum WapiError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WAPI returned an error
    #[error("WAPI error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, insufficient permissions)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Object not found (unknown or stale reference)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl WapiError {
    /// True when the error means the object does not exist on the appliance
    pub fn is_not_found(&self) -> bool {
        matches!(self, WapiError::NotFound(_))
    }
}
