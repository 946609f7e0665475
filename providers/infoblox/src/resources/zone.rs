//! infoblox_zone_auth

use crate::DEFAULT_DNS_VIEW;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::validate_hostname;
use ibclient::{Ea, ObjectManager, ZoneAuth};

const ZONE_FORMATS: &[&str] = &["FORWARD", "IPV4", "IPV6"];

/// Authoritative DNS zone
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoneAuthHandler;

#[async_trait::async_trait]
impl ObjectHandler for ZoneAuthHandler {
    type Object = ZoneAuth;
    const TYPE_NAME: &'static str = "infoblox_zone_auth";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("fqdn")
                .required()
                .immutable()
                .describe("Zone name; reverse zones use the network CIDR"),
            Attribute::string("view")
                .immutable()
                .default_value(DEFAULT_DNS_VIEW)
                .describe("DNS view of the zone"),
            Attribute::string("zone_format")
                .immutable()
                .default_value("FORWARD")
                .describe("FORWARD, IPV4 or IPV6"),
            Attribute::string("ns_group").describe("Name server group serving the zone"),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        let format = d.get_string("zone_format");
        if !ZONE_FORMATS.contains(&format.as_str()) {
            return Err(ProviderError::validation(format!(
                "'zone_format' must be one of {}, got '{}'",
                ZONE_FORMATS.join(", "),
                format
            )));
        }
        if format == "FORWARD" {
            validate_hostname("fqdn", &d.get_string("fqdn"))?;
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, op: Operation) -> Result<ZoneAuth> {
        let ns_group = d.get_str("ns_group").map(str::to_string);
        // An update without a group sends null so a removed group is cleared
        let ns_group = match op {
            Operation::Update => Some(ns_group),
            Operation::Create => ns_group.map(Some),
        };
        Ok(ZoneAuth {
            reference: None,
            fqdn: d.get_string("fqdn"),
            view: d.get_string("view"),
            zone_format: Some(d.get_string("zone_format")),
            ns_group,
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, zone: &ZoneAuth, d: &mut ResourceData) -> Result<()> {
        d.set("fqdn", zone.fqdn.as_str());
        d.set("view", zone.view.as_str());
        d.set("zone_format", zone.zone_format.as_deref().unwrap_or("FORWARD"));
        match zone.ns_group.as_ref().and_then(|group| group.as_deref()) {
            Some(group) if !group.is_empty() => d.set("ns_group", group),
            _ => {
                d.remove("ns_group");
            }
        }
        common::set_comment(d, zone.comment.as_deref());
        Ok(())
    }
}
