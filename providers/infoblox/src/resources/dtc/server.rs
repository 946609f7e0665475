//! infoblox_dtc_server

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use ibclient::{DtcServer, Ea, ObjectManager};

#[derive(Debug, Default, Clone, Copy)]
pub struct DtcServerHandler;

#[async_trait::async_trait]
impl ObjectHandler for DtcServerHandler {
    type Object = DtcServer;
    const TYPE_NAME: &'static str = "infoblox_dtc_server";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().describe("Name of the DTC server"),
            Attribute::string("host").required().describe("Address or FQDN of the server"),
            Attribute::bool("auto_create_host_record")
                .default_value(true)
                .describe("Create a host record for 'host'"),
            Attribute::bool("disable").default_value(false),
            common::comment(),
        ]
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<DtcServer> {
        Ok(DtcServer {
            reference: None,
            name: d.get_string("name"),
            host: d.get_string("host"),
            auto_create_host_record: d.get_bool("auto_create_host_record").unwrap_or(true),
            disable: d.get_bool("disable").unwrap_or(false),
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, server: &DtcServer, d: &mut ResourceData) -> Result<()> {
        d.set("name", server.name.as_str());
        d.set("host", server.host.as_str());
        d.set("auto_create_host_record", server.auto_create_host_record);
        d.set("disable", server.disable);
        common::set_comment(d, server.comment.as_deref());
        Ok(())
    }
}
