//! infoblox_txt_record

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use ibclient::{Ea, ObjectManager, TxtRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct TxtRecordHandler;

#[async_trait::async_trait]
impl ObjectHandler for TxtRecordHandler {
    type Object = TxtRecord;
    const TYPE_NAME: &'static str = "infoblox_txt_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("fqdn").required().describe("Fully qualified name of the record"),
            Attribute::string("text").required().describe("Record data"),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<TxtRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(TxtRecord {
            reference: None,
            name: d.get_string("fqdn"),
            text: d.get_string("text"),
            view: d.get_string("dns_view"),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, record: &TxtRecord, d: &mut ResourceData) -> Result<()> {
        d.set("fqdn", record.name.as_str());
        d.set("text", record.text.as_str());
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
