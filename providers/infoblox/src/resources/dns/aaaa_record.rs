//! infoblox_aaaa_record

use super::address_or_allocation;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::{IpFamily, exactly_one_of, validate_cidr, validate_ipv6};
use ibclient::{AaaaRecord, Ea, ObjectManager};

#[derive(Debug, Default, Clone, Copy)]
pub struct AaaaRecordHandler;

#[async_trait::async_trait]
impl ObjectHandler for AaaaRecordHandler {
    type Object = AaaaRecord;
    const TYPE_NAME: &'static str = "infoblox_aaaa_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("fqdn").required().describe("Fully qualified name of the record"),
            Attribute::string("ipv6_addr")
                .computed()
                .describe("IPv6 address; allocated from 'cidr' when not set"),
            Attribute::string("cidr").describe("IPv6 network to allocate the next available address from"),
            common::network_view(),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        if d.is_new_resource() {
            exactly_one_of(d, "ipv6_addr", "cidr")?;
        }
        if let Some(ip) = d.get_str("ipv6_addr") {
            validate_ipv6("ipv6_addr", ip)?;
        }
        if let Some(cidr) = d.get_str("cidr") {
            if validate_cidr("cidr", cidr)? != IpFamily::V6 {
                return Err(ProviderError::validation(format!("'cidr' must be an IPv6 network: {}", cidr)));
            }
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, op: Operation) -> Result<AaaaRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(AaaaRecord {
            reference: None,
            name: d.get_string("fqdn"),
            ipv6addr: address_or_allocation(d, "ipv6_addr", op)?,
            view: d.get_string("dns_view"),
            zone: None,
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, record: &AaaaRecord, d: &mut ResourceData) -> Result<()> {
        d.set("fqdn", record.name.as_str());
        d.set("ipv6_addr", record.ipv6addr.as_str());
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
