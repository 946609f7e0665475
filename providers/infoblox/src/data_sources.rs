//! Read-only searches over the managed object types
//!
//! A data source takes a `filters` map of WAPI search fields (`*Name` keys
//! match extensible attributes) and returns every matching object in
//! `results`, flattened the same way the resource of that type is.

use crate::CMP_TYPE;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{ObjectHandler, apply_remote};
use crate::resources::{dns, dtc, ipam, zone};
use crate::schema::{Attribute, Schema};
use ibclient::{ObjectManager, QueryParams, WapiConnector};
use serde_json::Value;
use tracing::debug;

/// A read-only object search
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Registered type name
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Run the search described by `d` and store the matches in `results`
    async fn read(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;
}

/// Search over the object type of a resource handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchDataSource<H>(pub H);

fn query_of(d: &ResourceData) -> Result<QueryParams> {
    let filters = d
        .get("filters")
        .and_then(Value::as_object)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ProviderError::validation("'filters' needs at least one search field"))?;

    let fields = filters
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key.clone(), s.clone()),
            other => (key.clone(), other.to_string()),
        })
        .collect::<Vec<_>>();
    Ok(QueryParams::new(false, fields))
}

/// Stable ID of a search: its filters in key order
fn search_id(query: &QueryParams) -> String {
    query
        .search_fields()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait::async_trait]
impl<H: ObjectHandler> DataSource for SearchDataSource<H> {
    fn type_name(&self) -> &'static str {
        H::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new(vec![
            Attribute::map("filters")
                .required()
                .describe("WAPI search fields; '*Name' keys match extensible attributes"),
            Attribute::list("results")
                .computed()
                .describe("Matching objects, with the attributes of the resource type"),
        ])
    }

    async fn read(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        let schema = self.schema();
        schema.validate(d)?;
        let query = query_of(d)?;

        let manager = ObjectManager::new(connector, CMP_TYPE, None);
        let objects = manager.search::<H::Object>(&query).await?;
        debug!("{} search {:?} matched {} objects", H::TYPE_NAME, query.search_fields(), objects.len());

        let mut results = Vec::with_capacity(objects.len());
        for object in &objects {
            let mut item = ResourceData::default();
            apply_remote(&self.0, object, &mut item)?;
            let mut attributes = item.attributes().clone();
            attributes.insert("id".to_string(), Value::String(item.id().to_string()));
            results.push(Value::Object(attributes));
        }

        d.set("results", results);
        d.set_id(search_id(&query));
        Ok(())
    }
}

/// Every data source, in registration order
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(SearchDataSource(dns::ARecordHandler)),
        Box::new(SearchDataSource(dns::AaaaRecordHandler)),
        Box::new(SearchDataSource(dns::CnameRecordHandler)),
        Box::new(SearchDataSource(dns::MxRecordHandler)),
        Box::new(SearchDataSource(dns::NsRecordHandler)),
        Box::new(SearchDataSource(dns::PtrRecordHandler)),
        Box::new(SearchDataSource(dns::SrvRecordHandler)),
        Box::new(SearchDataSource(dns::TxtRecordHandler)),
        Box::new(SearchDataSource(zone::ZoneAuthHandler)),
        Box::new(SearchDataSource(ipam::NetworkHandler::<ibclient::Network>::default())),
        Box::new(SearchDataSource(ipam::NetworkHandler::<ibclient::Ipv6Network>::default())),
        Box::new(SearchDataSource(ipam::NetworkViewHandler)),
        Box::new(SearchDataSource(dtc::DtcServerHandler)),
        Box::new(SearchDataSource(dtc::DtcPoolHandler)),
        Box::new(SearchDataSource(dtc::DtcLbdnHandler)),
    ]
}
