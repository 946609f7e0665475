//! infoblox_mx_record

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::validate_hostname;
use ibclient::{Ea, MxRecord, ObjectManager};

#[derive(Debug, Default, Clone, Copy)]
pub struct MxRecordHandler;

#[async_trait::async_trait]
impl ObjectHandler for MxRecordHandler {
    type Object = MxRecord;
    const TYPE_NAME: &'static str = "infoblox_mx_record";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("fqdn").required().describe("Domain the mail exchanger serves"),
            Attribute::string("mail_exchanger").required().describe("Host name of the mail exchanger"),
            Attribute::int("preference").required().describe("Preference, 0 to 65535; lower wins"),
            common::dns_view(),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        validate_hostname("mail_exchanger", &d.get_string("mail_exchanger"))?;
        common::u16_attr(d, "preference")?;
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<MxRecord> {
        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(MxRecord {
            reference: None,
            name: d.get_string("fqdn"),
            mail_exchanger: d.get_string("mail_exchanger"),
            preference: common::u16_attr(d, "preference")?,
            view: d.get_string("dns_view"),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, record: &MxRecord, d: &mut ResourceData) -> Result<()> {
        d.set("fqdn", record.name.as_str());
        d.set("mail_exchanger", record.mail_exchanger.as_str());
        d.set("preference", record.preference);
        d.set("dns_view", record.view.as_str());
        common::set_ttl(d, record.ttl, record.use_ttl);
        common::set_comment(d, record.comment.as_deref());
        Ok(())
    }
}
