//! Managed resource types.
//!
//! This module is organized by WAPI area:
//! - `dns`: DNS records (A, AAAA, CNAME, MX, NS, PTR, SRV, TXT)
//! - `zone`: authoritative zones
//! - `ipam`: networks and network views
//! - `dtc`: DNS traffic control servers, pools and LBDNs
//!
//! Every resource is an `ObjectHandler` wrapped in `HandlerResource`, which
//! supplies the shared create/read/update/delete/import behaviour from
//! `common`. The `infoblox_network` resource dispatches to the IPv4 or IPv6
//! handler depending on the address family.

pub mod common;
pub mod dns;
pub mod dtc;
pub mod ipam;
pub mod zone;

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::schema::Schema;
use common::HandlerResource;
use ibclient::WapiConnector;

/// A resource type the provider can manage
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Registered type name, e.g. "infoblox_a_record"
    fn type_name(&self) -> &'static str;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Create the remote object and record it in `d`
    async fn create(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;

    /// Refresh `d` from the remote object; clears the ID when it is gone
    async fn read(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;

    /// Apply the planned attributes; `d` is unchanged on failure
    async fn update(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;

    /// Delete the remote object and clear the ID
    async fn delete(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;

    /// Adopt an existing object whose reference is the ID of `d`
    async fn import(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()>;
}

/// Every resource type, in registration order
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(HandlerResource(dns::ARecordHandler)),
        Box::new(HandlerResource(dns::AaaaRecordHandler)),
        Box::new(HandlerResource(dns::CnameRecordHandler)),
        Box::new(HandlerResource(dns::MxRecordHandler)),
        Box::new(HandlerResource(dns::NsRecordHandler)),
        Box::new(HandlerResource(dns::PtrRecordHandler)),
        Box::new(HandlerResource(dns::SrvRecordHandler)),
        Box::new(HandlerResource(dns::TxtRecordHandler)),
        Box::new(HandlerResource(zone::ZoneAuthHandler)),
        Box::new(ipam::NetworkResource::default()),
        Box::new(HandlerResource(ipam::NetworkHandler::<ibclient::Network>::default())),
        Box::new(HandlerResource(ipam::NetworkHandler::<ibclient::Ipv6Network>::default())),
        Box::new(HandlerResource(ipam::NetworkViewHandler)),
        Box::new(HandlerResource(dtc::DtcServerHandler)),
        Box::new(HandlerResource(dtc::DtcPoolHandler)),
        Box::new(HandlerResource(dtc::DtcLbdnHandler)),
    ]
}
