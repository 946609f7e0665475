//! WAPI object models
//!
//! These models match the WAPI object schemas for the record, zone, network
//! and DTC types the provider manages. Read-only fields are skipped when
//! serializing so a model can be sent back as a request body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire form of a single extensible attribute value: `{"value": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EaWireValue {
    /// Attribute value (string, number, bool, or a list for multi-value attributes)
    pub value: serde_json::Value,
}

/// Extensible attributes of an object, keyed by attribute name
///
/// Serializes to the WAPI wire form `{"Name": {"value": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, EaWireValue>", into = "BTreeMap<String, EaWireValue>")]
pub struct Ea(BTreeMap<String, serde_json::Value>);

impl Ea {
    /// Empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Get an attribute value as a string, if it is one
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }

    /// Set an attribute value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<serde_json::Value> {
        self.0.remove(name)
    }

    /// Whether the attribute is set
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no attributes are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.0
    }

    /// Take the underlying map
    pub fn into_map(self) -> BTreeMap<String, serde_json::Value> {
        self.0
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Ea {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

impl From<BTreeMap<String, EaWireValue>> for Ea {
    fn from(wire: BTreeMap<String, EaWireValue>) -> Self {
        Self(wire.into_iter().map(|(k, v)| (k, v.value)).collect())
    }
}

impl From<Ea> for BTreeMap<String, EaWireValue> {
    fn from(ea: Ea) -> Self {
        ea.0.into_iter()
            .map(|(k, value)| (k, EaWireValue { value }))
            .collect()
    }
}

/// A WAPI object type the object manager can create, fetch, update and delete
pub trait WapiObject: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// WAPI object type, e.g. "record:a"
    const OBJECT_TYPE: &'static str;

    /// Fields requested on every read, on top of the type's defaults
    const RETURN_FIELDS: &'static [&'static str];

    /// Fields that WAPI refuses on update
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &[];

    /// The object's reference, once it exists on the appliance
    fn reference(&self) -> Option<&str>;

    /// Extensible attributes, for types that carry them
    fn ea(&self) -> Option<&Ea> {
        None
    }

    /// Mutable extensible attributes, for types that carry them
    fn ea_mut(&mut self) -> Option<&mut Ea> {
        None
    }
}

/// A record (record:a)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ARecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    /// Address, or a `func:nextavailableip:` expression on create
    pub ipv4addr: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing)]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl ARecord {
    /// New A record in `view`
    pub fn new(name: impl Into<String>, ipv4addr: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ipv4addr: ipv4addr.into(),
            view: view.into(),
            ..Default::default()
        }
    }
}

impl WapiObject for ARecord {
    const OBJECT_TYPE: &'static str = "record:a";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "ipv4addr", "view", "zone", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// AAAA record (record:aaaa)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AaaaRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    /// Address, or a `func:nextavailableip:` expression on create
    pub ipv6addr: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing)]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for AaaaRecord {
    const OBJECT_TYPE: &'static str = "record:aaaa";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "ipv6addr", "view", "zone", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// CNAME record (record:cname)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CnameRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub canonical: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for CnameRecord {
    const OBJECT_TYPE: &'static str = "record:cname";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "canonical", "view", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// MX record (record:mx)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub mail_exchanger: String,
    pub preference: u32,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for MxRecord {
    const OBJECT_TYPE: &'static str = "record:mx";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "mail_exchanger", "preference", "view", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Name server address entry of an NS record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameServerAddress {
    pub address: String,
    #[serde(default)]
    pub auto_create_ptr: bool,
}

/// NS record (record:ns); WAPI keeps no extensible attributes on it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NsRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub nameserver: String,
    #[serde(default)]
    pub addresses: Vec<NameServerAddress>,
    #[serde(default)]
    pub view: String,
}

impl WapiObject for NsRecord {
    const OBJECT_TYPE: &'static str = "record:ns";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "nameserver", "addresses", "view"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view", "name"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
}

/// PTR record (record:ptr)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PtrRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub ptrdname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6addr: Option<String>,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for PtrRecord {
    const OBJECT_TYPE: &'static str = "record:ptr";
    const RETURN_FIELDS: &'static [&'static str] = &["ptrdname", "name", "ipv4addr", "ipv6addr", "view", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// SRV record (record:srv)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SrvRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub priority: u32,
    pub weight: u32,
    pub port: u32,
    pub target: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for SrvRecord {
    const OBJECT_TYPE: &'static str = "record:srv";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "priority", "weight", "port", "target", "view", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// TXT record (record:txt)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxtRecord {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for TxtRecord {
    const OBJECT_TYPE: &'static str = "record:txt";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "text", "view", "ttl", "use_ttl", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Authoritative zone (zone_auth)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneAuth {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub fqdn: String,
    #[serde(default)]
    pub view: String,
    /// FORWARD, IPV4 or IPV6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_format: Option<String>,
    /// `Some(None)` is sent as `null` and clears the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns_group: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for ZoneAuth {
    const OBJECT_TYPE: &'static str = "zone_auth";
    const RETURN_FIELDS: &'static [&'static str] = &["fqdn", "view", "zone_format", "ns_group", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["fqdn", "view", "zone_format"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Common accessors of IPv4 and IPv6 networks
pub trait NetworkObject: WapiObject + Default {
    /// Build a network in `network_view`
    fn build(network_view: &str, network: &str, comment: Option<String>, ea: Ea) -> Self;
    /// CIDR, or a `func:nextavailablenetwork:` expression on create
    fn network(&self) -> &str;
    /// Owning network view
    fn network_view(&self) -> &str;
    /// Comment
    fn comment(&self) -> Option<&str>;
}

/// IPv4 network (network)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub network: String,
    #[serde(default)]
    pub network_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for Network {
    const OBJECT_TYPE: &'static str = "network";
    const RETURN_FIELDS: &'static [&'static str] = &["network", "network_view", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["network", "network_view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

impl NetworkObject for Network {
    fn build(network_view: &str, network: &str, comment: Option<String>, ea: Ea) -> Self {
        Self { reference: None, network: network.to_string(), network_view: network_view.to_string(), comment, ea }
    }
    fn network(&self) -> &str { &self.network }
    fn network_view(&self) -> &str { &self.network_view }
    fn comment(&self) -> Option<&str> { self.comment.as_deref() }
}

/// IPv6 network (ipv6network)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ipv6Network {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub network: String,
    #[serde(default)]
    pub network_view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for Ipv6Network {
    const OBJECT_TYPE: &'static str = "ipv6network";
    const RETURN_FIELDS: &'static [&'static str] = &["network", "network_view", "comment", "extattrs"];
    const UPDATE_EXCLUDED_FIELDS: &'static [&'static str] = &["network", "network_view"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

impl NetworkObject for Ipv6Network {
    fn build(network_view: &str, network: &str, comment: Option<String>, ea: Ea) -> Self {
        Self { reference: None, network: network.to_string(), network_view: network_view.to_string(), comment, ea }
    }
    fn network(&self) -> &str { &self.network }
    fn network_view(&self) -> &str { &self.network_view }
    fn comment(&self) -> Option<&str> { self.comment.as_deref() }
}

/// Network view (networkview)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkView {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for NetworkView {
    const OBJECT_TYPE: &'static str = "networkview";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "comment", "extattrs"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// DTC server (dtc:server)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DtcServer {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub host: String,
    #[serde(default)]
    pub auto_create_host_record: bool,
    #[serde(default)]
    pub disable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for DtcServer {
    const OBJECT_TYPE: &'static str = "dtc:server";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "host", "auto_create_host_record", "disable", "comment", "extattrs"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Server membership of a DTC pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DtcServerLink {
    /// dtc:server reference
    pub server: String,
    pub ratio: u32,
}

/// DTC pool (dtc:pool)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DtcPool {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub lb_preferred_method: String,
    #[serde(default)]
    pub servers: Vec<DtcServerLink>,
    #[serde(default)]
    pub disable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for DtcPool {
    const OBJECT_TYPE: &'static str = "dtc:pool";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "lb_preferred_method", "servers", "disable", "ttl", "use_ttl", "comment", "extattrs"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Pool membership of a DTC LBDN
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DtcPoolLink {
    /// dtc:pool reference
    pub pool: String,
    pub ratio: u32,
}

/// DTC load-balanced domain name (dtc:lbdn)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DtcLbdn {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    pub lb_method: String,
    #[serde(default)]
    pub pools: Vec<DtcPoolLink>,
    /// zone_auth references
    #[serde(default)]
    pub auth_zones: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub disable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: Ea,
}

impl WapiObject for DtcLbdn {
    const OBJECT_TYPE: &'static str = "dtc:lbdn";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "lb_method", "pools", "auth_zones", "patterns", "types", "disable", "ttl", "use_ttl", "comment", "extattrs"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
    fn ea(&self) -> Option<&Ea> { Some(&self.ea) }
    fn ea_mut(&mut self) -> Option<&mut Ea> { Some(&mut self.ea) }
}

/// Extensible attribute definition (extensibleattributedef)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EaDefinition {
    #[serde(rename = "_ref", default, skip_serializing)]
    pub reference: Option<String>,
    pub name: String,
    /// STRING, INTEGER, EMAIL, URL, DATE, ENUM
    #[serde(rename = "type", default)]
    pub ea_type: String,
    /// Flag letters; `M` allows multiple values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl EaDefinition {
    /// Whether the attribute accepts a list of values
    pub fn allows_multiple_values(&self) -> bool {
        self.flags.as_deref().is_some_and(|f| f.contains('M'))
    }
}

impl WapiObject for EaDefinition {
    const OBJECT_TYPE: &'static str = "extensibleattributedef";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "type", "flags", "comment"];

    fn reference(&self) -> Option<&str> { self.reference.as_deref() }
}
