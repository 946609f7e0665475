//! Typed object operations on top of a `WapiConnector`
//!
//! The object manager converts between the connector's untyped JSON and the
//! `WapiObject` models, stamps tenant attributes on created objects, and
//! offers the name-based lookups used to resolve references.

use crate::common::query::QueryParams;
use crate::connector_trait::WapiConnector;
use crate::error::WapiError;
use crate::models::*;
use tracing::{debug, info};

/// Extensible attribute carrying the tenant an object belongs to
pub const EA_TENANT_ID: &str = "Tenant ID";

/// Extensible attribute carrying the cloud management platform type
pub const EA_CMP_TYPE: &str = "CMP Type";

/// Typed WAPI operations bound to a connector
pub struct ObjectManager<'a> {
    connector: &'a dyn WapiConnector,
    cmp_type: String,
    tenant_id: Option<String>,
}

impl std::fmt::Debug for ObjectManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectManager")
            .field("base_url", &self.connector.base_url())
            .field("cmp_type", &self.cmp_type)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl<'a> ObjectManager<'a> {
    /// Create an object manager
    ///
    /// # Arguments
    /// * `connector` - Connector used for every call
    /// * `cmp_type` - Cloud management platform name stamped alongside the tenant
    /// * `tenant_id` - Tenant scope for created objects, if any
    pub fn new(connector: &'a dyn WapiConnector, cmp_type: impl Into<String>, tenant_id: Option<String>) -> Self {
        Self {
            connector,
            cmp_type: cmp_type.into(),
            tenant_id,
        }
    }

    /// The underlying connector
    pub fn connector(&self) -> &'a dyn WapiConnector {
        self.connector
    }

    /// Tenant this manager stamps on created objects
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Create an object and return it as stored on the appliance
    pub async fn create<T: WapiObject>(&self, mut object: T) -> Result<T, WapiError> {
        if let (Some(tenant_id), Some(ea)) = (self.tenant_id.as_deref(), object.ea_mut()) {
            ea.insert(EA_TENANT_ID, tenant_id);
            ea.insert(EA_CMP_TYPE, self.cmp_type.as_str());
        }

        let body = serde_json::to_value(&object)?;
        let reference = self.connector.create_object(T::OBJECT_TYPE, &body).await?;
        info!("Created {} object {}", T::OBJECT_TYPE, reference);

        self.get_by_ref(&reference).await
    }

    /// Fetch an object by reference
    ///
    /// # Returns
    /// * `Ok(T)` - The object
    /// * `Err(WapiError::NotFound)` - The reference is unknown or stale
    pub async fn get_by_ref<T: WapiObject>(&self, reference: &str) -> Result<T, WapiError> {
        debug!("Fetching {} by reference {}", T::OBJECT_TYPE, reference);
        let mut results = self.connector
            .get_object(T::OBJECT_TYPE, Some(reference), T::RETURN_FIELDS, &QueryParams::default())
            .await?;

        match results.pop() {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(WapiError::NotFound(format!("{} {} not found", T::OBJECT_TYPE, reference))),
        }
    }

    /// Search objects of a type by field and EA filters
    pub async fn search<T: WapiObject>(&self, query: &QueryParams) -> Result<Vec<T>, WapiError> {
        debug!("Searching {} with filters: {:?}", T::OBJECT_TYPE, query.search_fields());
        let results = self.connector
            .get_object(T::OBJECT_TYPE, None, T::RETURN_FIELDS, query)
            .await?;

        results
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(WapiError::Serialization))
            .collect()
    }

    /// Search for exactly one object; `Ok(None)` when nothing matches
    pub async fn search_one<T: WapiObject>(&self, query: &QueryParams) -> Result<Option<T>, WapiError> {
        let mut results = self.search::<T>(query).await?;
        if results.len() > 1 {
            return Err(WapiError::Api(format!(
                "{} search {:?} matched {} objects, expected one",
                T::OBJECT_TYPE,
                query.search_fields(),
                results.len()
            )));
        }
        Ok(results.pop())
    }

    /// Update the object behind `reference` and return its new state
    pub async fn update<T: WapiObject>(&self, reference: &str, object: &T) -> Result<T, WapiError> {
        let mut body = serde_json::to_value(object)?;
        if let Some(fields) = body.as_object_mut() {
            for field in T::UPDATE_EXCLUDED_FIELDS {
                fields.remove(*field);
            }
        }

        let new_reference = self.connector.update_object(reference, &body).await?;
        info!("Updated {} object {}", T::OBJECT_TYPE, new_reference);

        self.get_by_ref(&new_reference).await
    }

    /// Delete the object behind `reference`
    pub async fn delete(&self, reference: &str) -> Result<String, WapiError> {
        let deleted = self.connector.delete_object(reference).await?;
        info!("Deleted object {}", deleted);
        Ok(deleted)
    }

    // DNS record shortcuts

    /// Create an A record
    pub async fn create_a_record(&self, record: ARecord) -> Result<ARecord, WapiError> {
        self.create(record).await
    }

    /// Get an A record by reference
    pub async fn get_a_record_by_ref(&self, reference: &str) -> Result<ARecord, WapiError> {
        self.get_by_ref(reference).await
    }

    /// Update an A record
    pub async fn update_a_record(&self, reference: &str, record: &ARecord) -> Result<ARecord, WapiError> {
        self.update(reference, record).await
    }

    /// Delete an A record
    pub async fn delete_a_record(&self, reference: &str) -> Result<String, WapiError> {
        self.delete(reference).await
    }

    // Lookups used to resolve references by name

    /// Find an authoritative zone by FQDN within a DNS view
    pub async fn get_zone_auth_by_fqdn(&self, fqdn: &str, view: &str) -> Result<Option<ZoneAuth>, WapiError> {
        let query = QueryParams::new(false, [("fqdn", fqdn), ("view", view)]);
        self.search_one(&query).await
    }

    /// Find a network view by name
    pub async fn get_network_view_by_name(&self, name: &str) -> Result<Option<NetworkView>, WapiError> {
        let query = QueryParams::new(false, [("name", name)]);
        self.search_one(&query).await
    }

    /// Find a DTC server by name
    pub async fn get_dtc_server_by_name(&self, name: &str) -> Result<Option<DtcServer>, WapiError> {
        let query = QueryParams::new(false, [("name", name)]);
        self.search_one(&query).await
    }

    /// Find a DTC pool by name
    pub async fn get_dtc_pool_by_name(&self, name: &str) -> Result<Option<DtcPool>, WapiError> {
        let query = QueryParams::new(false, [("name", name)]);
        self.search_one(&query).await
    }

    /// Find an extensible attribute definition by name
    pub async fn get_ea_definition(&self, name: &str) -> Result<Option<EaDefinition>, WapiError> {
        let query = QueryParams::new(false, [("name", name)]);
        self.search_one(&query).await
    }
}

/// WAPI function expression allocating the next free address in `cidr`
pub fn next_available_ip(cidr: &str, network_view: &str) -> String {
    format!("func:nextavailableip:{},{}", cidr, network_view)
}

/// WAPI function expression allocating the next free `prefix_len` subnet of `parent_cidr`
pub fn next_available_network(parent_cidr: &str, network_view: &str, prefix_len: u8) -> String {
    format!("func:nextavailablenetwork:{},{},{}", parent_cidr, network_view, prefix_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_expressions() {
        assert_eq!(next_available_ip("10.0.0.0/24", "default"), "func:nextavailableip:10.0.0.0/24,default");
        assert_eq!(
            next_available_network("10.0.0.0/16", "corp", 24),
            "func:nextavailablenetwork:10.0.0.0/16,corp,24"
        );
    }
}
