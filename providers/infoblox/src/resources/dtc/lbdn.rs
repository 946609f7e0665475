//! infoblox_dtc_lbdn

use super::{check_one_of, member_entry, members};
use crate::DEFAULT_DNS_VIEW;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation, ref_display_name};
use crate::schema::Attribute;
use ibclient::{DtcLbdn, DtcPoolLink, Ea, ObjectManager};
use serde_json::json;

const LB_METHODS: &[&str] = &["GLOBAL_AVAILABILITY", "RATIO", "ROUND_ROBIN", "SOURCE_IP_HASH", "TOPOLOGY"];
const RECORD_TYPES: &[&str] = &["A", "AAAA", "CNAME", "NAPTR", "SRV"];

/// Load-balanced domain name
#[derive(Debug, Default, Clone, Copy)]
pub struct DtcLbdnHandler;

#[async_trait::async_trait]
impl ObjectHandler for DtcLbdnHandler {
    type Object = DtcLbdn;
    const TYPE_NAME: &'static str = "infoblox_dtc_lbdn";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().describe("Display name of the LBDN"),
            Attribute::string("lb_method").required().describe("Load balancing method across pools"),
            Attribute::list("pools")
                .default_value(json!([]))
                .describe("Members: objects with a pool 'pool' name and an optional 'ratio'"),
            Attribute::list("auth_zones")
                .default_value(json!([]))
                .describe("Names of the authoritative zones the LBDN answers in"),
            Attribute::string("dns_view")
                .default_value(DEFAULT_DNS_VIEW)
                .describe("DNS view the auth_zones are looked up in"),
            Attribute::list("patterns")
                .default_value(json!([]))
                .describe("Name patterns, e.g. *.example.com"),
            Attribute::list("types")
                .default_value(json!([]))
                .describe("Record types to balance: A, AAAA, CNAME, NAPTR, SRV"),
            Attribute::bool("disable").default_value(false),
            common::ttl(),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        check_one_of("lb_method", &d.get_string("lb_method"), LB_METHODS)?;
        members(d, "pools", "pool")?;
        for record_type in d.get_str_list("types") {
            check_one_of("types", &record_type, RECORD_TYPES)?;
        }
        Ok(())
    }

    async fn expand(&self, manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<DtcLbdn> {
        let mut pools = Vec::new();
        for (name, ratio) in members(d, "pools", "pool")? {
            let pool = manager
                .get_dtc_pool_by_name(&name)
                .await?
                .and_then(|p| p.reference)
                .ok_or_else(|| ProviderError::validation(format!("DTC pool '{}' does not exist", name)))?;
            pools.push(DtcPoolLink { pool, ratio });
        }

        let view = d.get_str("dns_view").unwrap_or(DEFAULT_DNS_VIEW);
        let mut auth_zones = Vec::new();
        for fqdn in d.get_str_list("auth_zones") {
            let zone = manager
                .get_zone_auth_by_fqdn(&fqdn, view)
                .await?
                .and_then(|z| z.reference)
                .ok_or_else(|| {
                    ProviderError::validation(format!("zone '{}' does not exist in view '{}'", fqdn, view))
                })?;
            auth_zones.push(zone);
        }

        let (ttl, use_ttl) = common::ttl_from(d)?;
        Ok(DtcLbdn {
            reference: None,
            name: d.get_string("name"),
            lb_method: d.get_string("lb_method"),
            pools,
            auth_zones,
            patterns: d.get_str_list("patterns"),
            types: d.get_str_list("types"),
            disable: d.get_bool("disable").unwrap_or(false),
            ttl,
            use_ttl,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, lbdn: &DtcLbdn, d: &mut ResourceData) -> Result<()> {
        d.set("name", lbdn.name.as_str());
        d.set("lb_method", lbdn.lb_method.as_str());
        d.set(
            "pools",
            lbdn.pools
                .iter()
                .map(|link| member_entry("pool", &link.pool, link.ratio))
                .collect::<Vec<_>>(),
        );
        d.set(
            "auth_zones",
            lbdn.auth_zones
                .iter()
                .map(|zone| ref_display_name(zone).unwrap_or(zone).to_string())
                .collect::<Vec<_>>(),
        );
        d.set("patterns", lbdn.patterns.clone());
        d.set("types", lbdn.types.clone());
        d.set("disable", lbdn.disable);
        common::set_ttl(d, lbdn.ttl, lbdn.use_ttl);
        common::set_comment(d, lbdn.comment.as_deref());
        Ok(())
    }
}
