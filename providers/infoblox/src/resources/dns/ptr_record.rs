//! infoblox_ptr_record

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::{IpFamily, exactly_one_of, ip_family, validate_hostname};
use ibclient::{Ea, ObjectManager, PtrRecord};

/// PTR record addressed by IP address or by its reverse-zone name
#[derive(Debug, Default, Clone, Copy)]
pub struct PtrRecordHandler;

/// Whether the record is addressed by IP (`true`) or by `record_name`
fn use_address(d: &ResourceData, op: Operation) -> bool {
    match op {
        Operation::Create => d.contains("ip_addr"),
        Operation::Update => {
            d.contains("ip_addr") && (d.has_change("ip_addr") || !d.has_change("record_name"))
        }
    }
}

#[async_trait::async_trait]
impl ObjectHandler for PtrRecordHandler {
    type Object = PtrRecord;
    const TYPE_NAME: &'static str = "infoblox_ptr_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("ptrdname").required().describe("Domain name the record points to"),
            Attribute::string("ip_addr")
                .computed()
                .describe("IPv4 or IPv6 address of the record; conflicts with 'record_name'"),
            Attribute::string("record_name")
                .computed()
                .describe("Name in the reverse zone, e.g. 1.0.0.10.in-addr.arpa"),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        if d.is_new_resource() {
            exactly_one_of(d, "ip_addr", "record_name")?;
        }
        validate_hostname("ptrdname", &d.get_string("ptrdname"))?;
        if let Some(ip) = d.get_str("ip_addr") {
            ip_family("ip_addr", ip)?;
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, op: Operation) -> Result<PtrRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        let mut record = PtrRecord {
            ptrdname: d.get_string("ptrdname"),
            view: d.get_string("dns_view"),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
            ..Default::default()
        };

        if use_address(d, op) {
            let ip = d.get_string("ip_addr");
            match ip_family("ip_addr", &ip)? {
                IpFamily::V4 => record.ipv4addr = Some(ip),
                IpFamily::V6 => record.ipv6addr = Some(ip),
            }
        } else {
            record.name = Some(d.get_str("record_name").map(str::to_string).ok_or_else(|| {
                ProviderError::validation("one of 'ip_addr' or 'record_name' must be set")
            })?);
        }
        Ok(record)
    }

    fn flatten(&self, record: &PtrRecord, d: &mut ResourceData) -> Result<()> {
        d.set("ptrdname", record.ptrdname.as_str());
        if let Some(ip) = record.ipv4addr.as_deref().or(record.ipv6addr.as_deref()) {
            d.set("ip_addr", ip);
        }
        if let Some(name) = record.name.as_deref() {
            d.set("record_name", name);
        }
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
