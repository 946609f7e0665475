//! infoblox_dtc_pool

use super::{check_one_of, member_entry, members};
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use ibclient::{DtcPool, DtcServerLink, Ea, ObjectManager};

const LB_PREFERRED_METHODS: &[&str] = &[
    "ALL_AVAILABLE",
    "DYNAMIC_RATIO",
    "GLOBAL_AVAILABILITY",
    "RATIO",
    "ROUND_ROBIN",
    "SOURCE_IP_HASH",
    "TOPOLOGY",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct DtcPoolHandler;

#[async_trait::async_trait]
impl ObjectHandler for DtcPoolHandler {
    type Object = DtcPool;
    const TYPE_NAME: &'static str = "infoblox_dtc_pool";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().describe("Name of the DTC pool"),
            Attribute::string("lb_preferred_method")
                .required()
                .describe("Load balancing method, e.g. ROUND_ROBIN or RATIO"),
            Attribute::list("servers")
                .default_value(serde_json::json!([]))
                .describe("Members: objects with a server 'server' name and an optional 'ratio'"),
            Attribute::bool("disable").default_value(false),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        check_one_of("lb_preferred_method", &d.get_string("lb_preferred_method"), LB_PREFERRED_METHODS)?;
        members(d, "servers", "server")?;
        Ok(())
    }

    async fn expand(&self, manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<DtcPool> {
        let mut servers = Vec::new();
        for (name, ratio) in members(d, "servers", "server")? {
            let server = manager
                .get_dtc_server_by_name(&name)
                .await?
                .and_then(|s| s.reference)
                .ok_or_else(|| ProviderError::validation(format!("DTC server '{}' does not exist", name)))?;
            servers.push(DtcServerLink { server, ratio });
        }

        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(DtcPool {
            reference: None,
            name: d.get_string("name"),
            lb_preferred_method: d.get_string("lb_preferred_method"),
            servers,
            disable: d.get_bool("disable").unwrap_or(false),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, pool: &DtcPool, d: &mut ResourceData) -> Result<()> {
        d.set("name", pool.name.as_str());
        d.set("lb_preferred_method", pool.lb_preferred_method.as_str());
        d.set(
            "servers",
            pool.servers
                .iter()
                .map(|link| member_entry("server", &link.server, link.ratio))
                .collect::<Vec<_>>(),
        );
        d.set("disable", pool.disable);
        common::set_ttl(d, pool.ttl, pool.use_ttl);
        common::set_comment(d, pool.comment.as_deref());
        Ok(())
    }
}
