//! infoblox_ipv4_network and infoblox_ipv6_network

use crate::DEFAULT_NET_VIEW;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use crate::validation::{IpFamily, conflicts_with, validate_cidr};
use ibclient::{Ea, Ipv6Network, Network, NetworkObject, ObjectManager, next_available_network};
use std::fmt;
use std::marker::PhantomData;

/// Address family specifics of a WAPI network type
pub trait NetworkKind: NetworkObject + 'static {
    const FAMILY: IpFamily;
    const TYPE_NAME: &'static str;
    const MAX_PREFIX_LEN: i64;
}

impl NetworkKind for Network {
    const FAMILY: IpFamily = IpFamily::V4;
    const TYPE_NAME: &'static str = "infoblox_ipv4_network";
    const MAX_PREFIX_LEN: i64 = 32;
}

impl NetworkKind for Ipv6Network {
    const FAMILY: IpFamily = IpFamily::V6;
    const TYPE_NAME: &'static str = "infoblox_ipv6_network";
    const MAX_PREFIX_LEN: i64 = 128;
}

/// Network with a fixed CIDR or the next free subnet of a parent network
pub struct NetworkHandler<N>(PhantomData<fn() -> N>);

impl<N> Default for NetworkHandler<N> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<N: NetworkKind> fmt::Debug for NetworkHandler<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NetworkHandler").field(&N::TYPE_NAME).finish()
    }
}

fn prefix_len_of(cidr: &str) -> Option<i64> {
    cidr.split_once('/').and_then(|(_, prefix)| prefix.parse().ok())
}

fn check_family<N: NetworkKind>(field: &str, cidr: &str) -> Result<()> {
    if validate_cidr(field, cidr)? != N::FAMILY {
        return Err(ProviderError::validation(format!(
            "'{}' is not a {:?} network: {}",
            field,
            N::FAMILY,
            cidr
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl<N: NetworkKind> ObjectHandler for NetworkHandler<N> {
    type Object = N;
    const TYPE_NAME: &'static str = N::TYPE_NAME;

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("network_view")
                .immutable()
                .default_value(DEFAULT_NET_VIEW)
                .describe("Network view the network belongs to"),
            Attribute::string("cidr")
                .computed()
                .immutable()
                .describe("Network address; allocated from 'parent_cidr' when not set"),
            Attribute::string("parent_cidr").describe("Network to allocate a subnet from"),
            Attribute::int("allocate_prefix_len").describe("Prefix length of the allocated subnet"),
            common::comment(),
        ]
    }

    fn validate(&self, d: &ResourceData) -> Result<()> {
        if let Some(cidr) = d.get_str("cidr") {
            check_family::<N>("cidr", cidr)?;
        }
        if !d.is_new_resource() {
            return Ok(());
        }

        conflicts_with(d, "cidr", "parent_cidr")?;
        if d.contains("cidr") {
            return Ok(());
        }

        let parent = d
            .get_str("parent_cidr")
            .ok_or_else(|| ProviderError::validation("one of 'cidr' or 'parent_cidr' must be set"))?;
        check_family::<N>("parent_cidr", parent)?;
        let prefix_len = d.get_i64("allocate_prefix_len").ok_or_else(|| {
            ProviderError::validation("'allocate_prefix_len' is required with 'parent_cidr'")
        })?;
        let parent_len = prefix_len_of(parent).unwrap_or_default();
        if prefix_len <= parent_len || prefix_len > N::MAX_PREFIX_LEN {
            return Err(ProviderError::validation(format!(
                "'allocate_prefix_len' must be between {} and {}, got {}",
                parent_len + 1,
                N::MAX_PREFIX_LEN,
                prefix_len
            )));
        }
        Ok(())
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, op: Operation) -> Result<N> {
        let network_view = d.get_string("network_view");
        let network = match (op, d.get_str("cidr"), d.get_str("parent_cidr")) {
            (_, Some(cidr), _) => cidr.to_string(),
            (Operation::Create, None, Some(parent)) => {
                let prefix_len = d
                    .get_i64("allocate_prefix_len")
                    .and_then(|len| u8::try_from(len).ok())
                    .ok_or_else(|| ProviderError::validation("'allocate_prefix_len' is out of range"))?;
                next_available_network(parent, &network_view, prefix_len)
            }
            _ => return Err(ProviderError::validation("network has no 'cidr'")),
        };
        Ok(N::build(&network_view, &network, common::comment_of(d), ea))
    }

    fn flatten(&self, network: &N, d: &mut ResourceData) -> Result<()> {
        d.set("cidr", network.network());
        d.set("network_view", network.network_view());
        common::set_comment(d, network.comment());
        Ok(())
    }
}
