//! infoblox_cname_record

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::validate_hostname;
use ibclient::{CnameRecord, Ea, ObjectManager};

#[derive(Debug, Default, Clone, Copy)]
pub struct CnameRecordHandler;

#[async_trait::async_trait]
impl ObjectHandler for CnameRecordHandler {
    type Object = CnameRecord;
    const TYPE_NAME: &'static str = "infoblox_cname_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("alias").required().describe("Alias name (the record's own name)"),
            Attribute::string("canonical").required().describe("Canonical name the alias points to"),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        validate_hostname("canonical", &d.get_string("canonical"))
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<CnameRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(CnameRecord {
            reference: None,
            name: d.get_string("alias"),
            canonical: d.get_string("canonical"),
            view: d.get_string("dns_view"),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, record: &CnameRecord, d: &mut ResourceData) -> Result<()> {
        d.set("alias", record.name.as_str());
        d.set("canonical", record.canonical.as_str());
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
