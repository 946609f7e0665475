//! IPAM resources: networks and network views
//!
//! IPv4 and IPv6 networks share one handler, parameterized by `NetworkKind`.
//! `infoblox_network` accepts either family and routes each call to the
//! matching handler.

mod network;
mod network_view;

pub use network::{NetworkHandler, NetworkKind};
pub use network_view::NetworkViewHandler;

use super::Resource;
use super::common::{self, schema_of};
use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::schema::Schema;
use crate::validation::{IpFamily, validate_cidr};
use ibclient::{Ipv6Network, Network, WapiConnector};

/// Network of either family
#[derive(Debug, Default)]
pub struct NetworkResource {
    v4: NetworkHandler<Network>,
    v6: NetworkHandler<Ipv6Network>,
}

impl NetworkResource {
    /// Family from the CIDR, the parent CIDR, or the reference of an existing network
    fn family(d: &ResourceData) -> Result<IpFamily> {
        if let Some(cidr) = d.get_str("cidr") {
            return validate_cidr("cidr", cidr);
        }
        if let Some(parent) = d.get_str("parent_cidr") {
            return validate_cidr("parent_cidr", parent);
        }
        if d.id().starts_with("ipv6network/") {
            return Ok(IpFamily::V6);
        }
        Ok(IpFamily::V4)
    }
}

#[async_trait::async_trait]
impl Resource for NetworkResource {
    fn type_name(&self) -> &'static str {
        "infoblox_network"
    }

    fn schema(&self) -> Schema {
        schema_of(&self.v4)
    }

    async fn create(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        match Self::family(d)? {
            IpFamily::V4 => common::create_object(&self.v4, connector, d).await,
            IpFamily::V6 => common::create_object(&self.v6, connector, d).await,
        }
    }

    async fn read(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        match Self::family(d)? {
            IpFamily::V4 => common::read_object(&self.v4, connector, d).await,
            IpFamily::V6 => common::read_object(&self.v6, connector, d).await,
        }
    }

    async fn update(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        match Self::family(d)? {
            IpFamily::V4 => common::update_object(&self.v4, connector, d).await,
            IpFamily::V6 => common::update_object(&self.v6, connector, d).await,
        }
    }

    async fn delete(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        match Self::family(d)? {
            IpFamily::V4 => common::delete_object(&self.v4, connector, d).await,
            IpFamily::V6 => common::delete_object(&self.v6, connector, d).await,
        }
    }

    async fn import(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        match Self::family(d)? {
            IpFamily::V4 => common::import_object(&self.v4, connector, d).await,
            IpFamily::V6 => common::import_object(&self.v6, connector, d).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(attrs: serde_json::Value) -> ResourceData {
        ResourceData::new(attrs.as_object().cloned().unwrap())
    }

    #[test]
    fn test_family_selection() {
        assert_eq!(NetworkResource::family(&data(json!({"cidr": "10.0.0.0/24"}))).unwrap(), IpFamily::V4);
        assert_eq!(NetworkResource::family(&data(json!({"cidr": "2001:db8::/64"}))).unwrap(), IpFamily::V6);
        assert_eq!(
            NetworkResource::family(&data(json!({"parent_cidr": "2001:db8::/48", "allocate_prefix_len": 64}))).unwrap(),
            IpFamily::V6
        );
        assert!(NetworkResource::family(&data(json!({"cidr": "10.0.0.0"}))).is_err());

        let imported = ResourceData::for_import("ipv6network/ZG5zLm5ldHdvcms:2001:db8::/64/default");
        assert_eq!(NetworkResource::family(&imported).unwrap(), IpFamily::V6);
    }
}
