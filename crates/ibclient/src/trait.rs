//! WapiConnector trait for mocking
//!
//! This trait abstracts the raw WAPI object surface so the object manager and
//! the provider can run against either the HTTP client or an in-memory mock.
//! Bodies and results are untyped JSON; typing happens in the object manager.

use crate::common::query::QueryParams;
use crate::error::WapiError;

/// Trait for WAPI object operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait WapiConnector: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate credentials and connectivity
    async fn validate_credentials(&self) -> Result<(), WapiError>;

    /// Create an object of `object_type`, returning its reference
    async fn create_object(&self, object_type: &str, body: &serde_json::Value) -> Result<String, WapiError>;

    /// Fetch objects, either a single one by `reference` or all matches of `query`
    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        return_fields: &[&str],
        query: &QueryParams,
    ) -> Result<Vec<serde_json::Value>, WapiError>;

    /// Update the object behind `reference`, returning its (possibly new) reference
    async fn update_object(&self, reference: &str, body: &serde_json::Value) -> Result<String, WapiError>;

    /// Delete the object behind `reference`, returning the deleted reference
    async fn delete_object(&self, reference: &str) -> Result<String, WapiError>;
}
