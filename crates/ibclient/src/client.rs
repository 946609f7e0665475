//! WAPI HTTP connector
//!
//! Implements `WapiConnector` over the Infoblox REST API.
//! URL structure: https://{host}:{port}/wapi/v{version}/{object_type or ref}

use crate::common::HttpClient;
use crate::common::query::QueryParams;
use crate::connector_trait::WapiConnector;
use crate::error::WapiError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Grid master address and credentials
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Grid master host name or address
    pub host: String,
    /// WAPI version, e.g. "2.7"
    pub version: String,
    /// HTTPS port
    pub port: String,
    /// User name for basic authentication
    pub username: String,
    /// Password for basic authentication
    pub password: String,
}

impl HostConfig {
    /// Base URL of the WAPI endpoint
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/wapi/v{}", self.host, self.port, self.version)
    }
}

/// HTTP transport settings
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Verify the appliance's TLS certificate
    pub ssl_verify: bool,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Maximum idle connections kept per host
    pub pool_connections: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ssl_verify: false,
            connect_timeout: Duration::from_secs(60),
            pool_connections: 10,
        }
    }
}

/// WAPI REST client
#[derive(Debug)]
pub struct WapiClient {
    http: HttpClient,
}

impl WapiClient {
    /// Create a new WAPI client
    ///
    /// # Arguments
    /// * `host` - Grid master location and credentials
    /// * `transport` - TLS verification, timeout and pool settings
    pub fn new(host: HostConfig, transport: TransportConfig) -> Result<Self, WapiError> {
        Self::with_base_url(host.base_url(), host.username, host.password, transport)
    }

    /// Create a client against an explicit base URL (e.g., a test server)
    pub fn with_base_url(
        base_url: String,
        username: String,
        password: String,
        transport: TransportConfig,
    ) -> Result<Self, WapiError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!transport.ssl_verify)
            .connect_timeout(transport.connect_timeout)
            .pool_max_idle_per_host(transport.pool_connections)
            .build()
            .map_err(WapiError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, username, password),
        })
    }
}

#[async_trait::async_trait]
impl WapiConnector for WapiClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate credentials by reading the grid object.
    ///
    /// The grid object is readable by every API user and requires authentication.
    async fn validate_credentials(&self) -> Result<(), WapiError> {
        debug!("Validating WAPI credentials and connectivity");
        self.http.get("grid", "_return_fields=name").await?;
        debug!("Credentials validated successfully");
        Ok(())
    }

    async fn create_object(&self, object_type: &str, body: &serde_json::Value) -> Result<String, WapiError> {
        debug!("Creating {} object", object_type);
        let value = self.http.post(object_type, "", body).await?;
        reference_from(value, object_type)
    }

    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        return_fields: &[&str],
        query: &QueryParams,
    ) -> Result<Vec<serde_json::Value>, WapiError> {
        match reference {
            Some(reference) => {
                let query_string = QueryParams::default().to_query_string(return_fields);
                let value = self.http.get(reference, &query_string).await?;
                Ok(vec![value])
            }
            None => {
                debug!("Querying {} with filters: {:?}", object_type, query.search_fields());
                let query_string = query.to_query_string(return_fields);
                match self.http.get(object_type, &query_string).await? {
                    serde_json::Value::Array(items) => Ok(items),
                    serde_json::Value::Null => Ok(Vec::new()),
                    other => Err(WapiError::Api(format!(
                        "expected a list of {} objects, got: {}",
                        object_type, other
                    ))),
                }
            }
        }
    }

    async fn update_object(&self, reference: &str, body: &serde_json::Value) -> Result<String, WapiError> {
        debug!("Updating object {}", reference);
        let value = self.http.put(reference, body).await?;
        reference_from(value, reference)
    }

    async fn delete_object(&self, reference: &str) -> Result<String, WapiError> {
        debug!("Deleting object {}", reference);
        let value = self.http.delete(reference).await?;
        reference_from(value, reference)
    }
}

/// WAPI answers writes with the object reference as a bare JSON string
fn reference_from(value: serde_json::Value, context: &str) -> Result<String, WapiError> {
    match value {
        serde_json::Value::String(reference) => Ok(reference),
        other => Err(WapiError::Api(format!(
            "expected an object reference for {}, got: {}",
            context, other
        ))),
    }
}
