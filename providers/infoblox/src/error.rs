//! Provider-specific error types.
//!
//! This module defines the errors a resource operation can end with. Client
//! errors are wrapped as they are; not-found is recognised on both levels so
//! handlers can treat it as "deleted out of band".

use ibclient::WapiError;
use thiserror::Error;

/// Errors that can occur in a provider operation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// WAPI client error
    #[error("WAPI error: {0}")]
    Wapi(#[from] WapiError),

    /// `ext_attrs` is not a JSON object
    #[error("Failed to parse extensible attributes: {0}")]
    EaParse(String),

    /// An extensible attribute value has an unsupported shape
    #[error("Invalid extensible attribute value: {0}")]
    InvalidEaValue(String),

    /// Remote object not found by reference or internal ID
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Attribute validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No resource or data source registered under this type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    /// True when the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::NotFound(_) => true,
            ProviderError::Wapi(e) => e.is_not_found(),
            _ => false,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ProviderError::Validation(message.into())
    }
}

/// Result alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
