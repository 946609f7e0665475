//! Provider registry
//!
//! Holds the WAPI connector and every resource and data source by type name,
//! and routes each operation to the registered implementation.

use crate::data_sources::{self, DataSource};
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::{self, Resource};
use crate::schema::Schema;
use ibclient::WapiConnector;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Resource operations the provider dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceOperation::Create => "create",
            ResourceOperation::Read => "read",
            ResourceOperation::Update => "update",
            ResourceOperation::Delete => "delete",
            ResourceOperation::Import => "import",
        };
        f.write_str(name)
    }
}

/// Resources and data sources keyed by type name, sharing one WAPI connector
pub struct Provider {
    connector: Arc<dyn WapiConnector>,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Box<dyn DataSource>>,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("base_url", &self.connector.base_url())
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Provider {
    /// Provider with every built-in resource and data source
    pub fn new(connector: Arc<dyn WapiConnector>) -> Self {
        let resources = resources::all().into_iter().map(|r| (r.type_name(), r)).collect();
        let data_sources = data_sources::all().into_iter().map(|s| (s.type_name(), s)).collect();
        Self {
            connector,
            resources,
            data_sources,
        }
    }

    /// Check connectivity and credentials against the grid master
    pub async fn configure(&self) -> Result<()> {
        info!("Connecting to {}", self.connector.base_url());
        self.connector.validate_credentials().await?;
        Ok(())
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    /// Registered data source type names, sorted
    pub fn data_source_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownType(format!("resource '{}'", type_name)))
    }

    fn data_source(&self, type_name: &str) -> Result<&dyn DataSource> {
        self.data_sources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownType(format!("data source '{}'", type_name)))
    }

    /// Schema of a resource type
    pub fn resource_schema(&self, type_name: &str) -> Result<Schema> {
        Ok(self.resource(type_name)?.schema())
    }

    /// Schema of a data source type
    pub fn data_source_schema(&self, type_name: &str) -> Result<Schema> {
        Ok(self.data_source(type_name)?.schema())
    }

    /// Run one resource operation on `d`
    pub async fn apply(&self, operation: ResourceOperation, type_name: &str, d: &mut ResourceData) -> Result<()> {
        let resource = self.resource(type_name)?;
        let connector = self.connector.as_ref();
        debug!("{} {} {}", operation, type_name, d.id());
        match operation {
            ResourceOperation::Create => resource.create(connector, d).await,
            ResourceOperation::Read => resource.read(connector, d).await,
            ResourceOperation::Update => resource.update(connector, d).await,
            ResourceOperation::Delete => resource.delete(connector, d).await,
            ResourceOperation::Import => resource.import(connector, d).await,
        }
    }

    /// Create the object described by `d` and record its ID
    pub async fn create(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(ResourceOperation::Create, type_name, d).await
    }

    /// Refresh `d` from the appliance; clears the ID if the object is gone
    pub async fn read(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(ResourceOperation::Read, type_name, d).await
    }

    /// Apply the planned changes in `d`, rolling back `d` on failure
    pub async fn update(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(ResourceOperation::Update, type_name, d).await
    }

    /// Delete the object and clear the ID
    pub async fn delete(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(ResourceOperation::Delete, type_name, d).await
    }

    /// Adopt an existing object by reference
    pub async fn import(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        self.apply(ResourceOperation::Import, type_name, d).await
    }

    /// Run a data source search
    pub async fn read_data_source(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        let source = self.data_source(type_name)?;
        source.read(self.connector.as_ref(), d).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibclient::MockConnector;

    #[test]
    fn test_registry_covers_every_type() {
        let provider = Provider::new(Arc::new(MockConnector::default()));
        let resources: Vec<_> = provider.resource_types().collect();
        for name in [
            "infoblox_a_record",
            "infoblox_aaaa_record",
            "infoblox_cname_record",
            "infoblox_mx_record",
            "infoblox_ns_record",
            "infoblox_ptr_record",
            "infoblox_srv_record",
            "infoblox_txt_record",
            "infoblox_zone_auth",
            "infoblox_network",
            "infoblox_network_view",
            "infoblox_dtc_server",
            "infoblox_dtc_pool",
            "infoblox_dtc_lbdn",
        ] {
            assert!(resources.contains(&name), "{} is not registered", name);
        }
        assert_eq!(provider.data_source_types().count(), 15);
    }

    #[tokio::test]
    async fn test_unknown_type() {
        let provider = Provider::new(Arc::new(MockConnector::default()));
        let mut d = ResourceData::default();
        assert!(matches!(
            provider.create("infoblox_host_record", &mut d).await,
            Err(ProviderError::UnknownType(_))
        ));
        assert!(matches!(
            provider.read_data_source("infoblox_host_record", &mut d).await,
            Err(ProviderError::UnknownType(_))
        ));
        assert!(provider.resource_schema("infoblox_host_record").is_err());
    }

    #[tokio::test]
    async fn test_configure_checks_credentials() {
        let provider = Provider::new(Arc::new(MockConnector::default()));
        provider.configure().await.unwrap();
    }
}
