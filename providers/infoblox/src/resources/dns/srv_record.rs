//! infoblox_srv_record

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::{validate_hostname, validate_srv_name};
use ibclient::{Ea, ObjectManager, SrvRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct SrvRecordHandler;

#[async_trait::async_trait]
impl ObjectHandler for SrvRecordHandler {
    type Object = SrvRecord;
    const TYPE_NAME: &'static str = "infoblox_srv_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().describe("Service name: _service._proto.domain"),
            Attribute::int("priority").required().describe("Priority, 0 to 65535"),
            Attribute::int("weight").required().describe("Weight, 0 to 65535"),
            Attribute::int("port").required().describe("Service port, 0 to 65535"),
            Attribute::string("target").required().describe("Host name providing the service"),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        validate_srv_name(&d.get_string("name"))?;
        validate_hostname("target", &d.get_string("target"))?;
        for field in ["priority", "weight", "port"] {
            common::u16_attr(d, field)?;
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<SrvRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(SrvRecord {
            reference: None,
            name: d.get_string("name"),
            priority: common::u16_attr(d, "priority")?,
            weight: common::u16_attr(d, "weight")?,
            port: common::u16_attr(d, "port")?,
            target: d.get_string("target"),
            view: d.get_string("dns_view"),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, record: &SrvRecord, d: &mut ResourceData) -> Result<()> {
        d.set("name", record.name.as_str());
        d.set("priority", record.priority);
        d.set("weight", record.weight);
        d.set("port", record.port);
        d.set("target", record.target.as_str());
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
