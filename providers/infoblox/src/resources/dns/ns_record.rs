//! infoblox_ns_record
//!
//! WAPI keeps no extensible attributes on NS records, so these are resolved
//! by reference only.

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::{ip_family, validate_hostname};
use ibclient::{Ea, NameServerAddress, NsRecord, ObjectManager};
use serde_json::{Value, json};

#[derive(Debug, Default, Clone, Copy)]
pub struct NsRecordHandler;

fn addresses_of(d: &ResourceData) -> Result<Vec<NameServerAddress>> {
    d.get_list("addresses")
        .iter()
        .map(|entry| {
            let address = entry
                .get("address")
                .and_then(Value::as_str)
                .ok_or_else(|| ProviderError::validation("every entry of 'addresses' needs an 'address'"))?;
            ip_family("addresses.address", address)?;
            Ok(NameServerAddress {
                address: address.to_string(),
                auto_create_ptr: entry.get("auto_create_ptr").and_then(Value::as_bool).unwrap_or(false),
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl ObjectHandler for NsRecordHandler {
    type Object = NsRecord;
    const TYPE_NAME: &'static str = "infoblox_ns_record";
    const SUPPORTS_EA: bool = false;
    const SUPPORTS_INTERNAL_ID: bool = false;

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().immutable().describe("Zone the name server is authoritative for"),
            Attribute::string("nameserver").required().describe("Host name of the name server"),
            Attribute::list("addresses")
                .required()
                .describe("Name server addresses: objects with 'address' and optional 'auto_create_ptr'"),
            common::dns_view(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        validate_hostname("nameserver", &d.get_string("nameserver"))?;
        if addresses_of(d)?.is_empty() {
            return Err(ProviderError::validation("'addresses' needs at least one entry"));
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, _ea: Ea, _op: Operation) -> Result<NsRecord> {
        Ok(NsRecord {
            reference: None,
            name: d.get_string("name"),
            nameserver: d.get_string("nameserver"),
            addresses: addresses_of(d)?,
            view: d.get_string("dns_view"),
        })
    }

    fn flatten(&self, record: &NsRecord, d: &mut ResourceData) -> Result<()> {
        d.set("name", record.name.as_str());
        d.set("nameserver", record.nameserver.as_str());
        d.set(
            "addresses",
            record
                .addresses
                .iter()
                .map(|a| json!({"address": a.address, "auto_create_ptr": a.auto_create_ptr}))
                .collect::<Vec<_>>(),
        );
        d.set("dns_view", record.view.as_str());
        Ok(())
    }
}
