//! Common utilities for the WAPI client
//!
//! Provides the authenticated HTTP wrapper shared by every connector call.

pub mod query;

use crate::error::WapiError;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// WAPI error body marker for unknown or stale references
const NOT_FOUND_MARKERS: &[&str] = &["AdmConDataNotFoundError", "Client.Ibap.Data.NotFound"];

/// HTTP client wrapper with basic authentication
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from an object type or reference plus an encoded query
    pub fn build_url(&self, path: &str, query: &str) -> String {
        let path = path.trim_start_matches('/');
        if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query)
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, query: &str) -> Result<serde_json::Value, WapiError> {
        let url = self.build_url(path, query);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(WapiError::Http)?;

        Self::read_response("GET", path, response).await
    }

    /// Make a POST request
    pub async fn post(
        &self,
        path: &str,
        query: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, WapiError> {
        let url = self.build_url(path, query);
        debug!("POST {} with body: {}", url, body);

        let response = self.client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(WapiError::Http)?;

        Self::read_response("POST", path, response).await
    }

    /// Make a PUT request
    pub async fn put(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, WapiError> {
        let url = self.build_url(path, "");
        debug!("PUT {} with body: {}", url, body);

        let response = self.client
            .put(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(WapiError::Http)?;

        Self::read_response("PUT", path, response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<serde_json::Value, WapiError> {
        let url = self.build_url(path, "");
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(WapiError::Http)?;

        Self::read_response("DELETE", path, response).await
    }

    /// Map a response to JSON or to the matching error variant
    async fn read_response(
        method: &str,
        path: &str,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, WapiError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Some(err) = classify_status(method, path, status, &body) {
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            WapiError::Api(format!(
                "error decoding {} {} response: {} - Response (first 500 chars): {}",
                method,
                path,
                e,
                body.chars().take(500).collect::<String>()
            ))
        })
    }
}

/// Translate a non-success status into a `WapiError`
///
/// Returns `None` for success statuses.
pub(crate) fn classify_status(method: &str, path: &str, status: StatusCode, body: &str) -> Option<WapiError> {
    if status.is_success() {
        return None;
    }

    if status == StatusCode::NOT_FOUND || NOT_FOUND_MARKERS.iter().any(|m| body.contains(m)) {
        return Some(WapiError::NotFound(format!("{} {}: {}", method, path, body)));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(WapiError::Authentication(format!("{} - {}", status, body)));
    }

    Some(WapiError::Api(format!(
        "{} {} failed: {} - {}",
        method, path, status, body
    )))
}
