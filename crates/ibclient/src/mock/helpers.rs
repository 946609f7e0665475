//! Helper functions for the mock connector: filter matching and
//! `func:` expression expansion

use crate::error::WapiError;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Whether a stored object satisfies every search field
pub fn matches_filters(object: &serde_json::Value, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(key, expected)| {
        let actual = match key.strip_prefix('*') {
            Some(ea_name) => object.get("extattrs").and_then(|ea| ea.get(ea_name)).and_then(|v| v.get("value")),
            None => object.get(key.as_str()),
        };
        actual.is_some_and(|value| value_matches(value, expected))
    })
}

fn value_matches(value: &serde_json::Value, expected: &str) -> bool {
    match value {
        serde_json::Value::String(s) => s == expected,
        serde_json::Value::Array(items) => items.iter().any(|item| value_matches(item, expected)),
        other => other.to_string() == expected,
    }
}

/// Parsed `func:` allocation expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// `func:nextavailableip:<cidr>,<view>`
    Address { cidr: String },
    /// `func:nextavailablenetwork:<parent>,<view>,<prefix_len>`
    Network { parent: String, prefix_len: u8 },
}

/// Parse a `func:` expression, or `None` for a literal value
pub fn parse_allocation(value: &str) -> Result<Option<Allocation>, WapiError> {
    if let Some(args) = value.strip_prefix("func:nextavailableip:") {
        let cidr = args.split(',').next().unwrap_or_default().to_string();
        return Ok(Some(Allocation::Address { cidr }));
    }
    if let Some(args) = value.strip_prefix("func:nextavailablenetwork:") {
        let parts: Vec<&str> = args.split(',').collect();
        if parts.len() != 3 {
            return Err(WapiError::InvalidRequest(format!("malformed function call: {}", value)));
        }
        let prefix_len = parts[2]
            .parse()
            .map_err(|_| WapiError::InvalidRequest(format!("bad prefix length in: {}", value)))?;
        return Ok(Some(Allocation::Network { parent: parts[0].to_string(), prefix_len }));
    }
    Ok(None)
}

fn split_cidr(cidr: &str) -> Result<(IpAddr, u8), WapiError> {
    let (addr, len) = cidr
        .split_once('/')
        .ok_or_else(|| WapiError::InvalidRequest(format!("not a CIDR: {}", cidr)))?;
    let addr: IpAddr = addr
        .parse()
        .map_err(|_| WapiError::InvalidRequest(format!("not a CIDR: {}", cidr)))?;
    let len: u8 = len
        .parse()
        .map_err(|_| WapiError::InvalidRequest(format!("not a CIDR: {}", cidr)))?;
    Ok((addr, len))
}

/// The `index`-th host address of `cidr` (index 1 is the first usable address)
pub fn nth_address(cidr: &str, index: u64) -> Result<String, WapiError> {
    match split_cidr(cidr)? {
        (IpAddr::V4(base), len) => {
            let size = 1u64 << (32 - u32::from(len.min(32)));
            if index >= size {
                return Err(WapiError::Api(format!("No available IPs in network {}", cidr)));
            }
            let addr = u32::from(base).wrapping_add(index as u32);
            Ok(Ipv4Addr::from(addr).to_string())
        }
        (IpAddr::V6(base), _) => {
            let addr = u128::from(base).wrapping_add(u128::from(index));
            Ok(Ipv6Addr::from(addr).to_string())
        }
    }
}

/// The `index`-th `prefix_len` subnet of `parent`
pub fn nth_subnet(parent: &str, prefix_len: u8, index: u64) -> Result<String, WapiError> {
    match split_cidr(parent)? {
        (IpAddr::V4(base), parent_len) => {
            if prefix_len < parent_len || prefix_len > 32 {
                return Err(WapiError::InvalidRequest(format!("cannot carve /{} from {}", prefix_len, parent)));
            }
            let count = 1u64 << (prefix_len - parent_len);
            if index >= count {
                return Err(WapiError::Api(format!("No available networks in {}", parent)));
            }
            let step = 1u64 << (32 - u32::from(prefix_len));
            let addr = u64::from(u32::from(base)) + index * step;
            Ok(format!("{}/{}", Ipv4Addr::from(addr as u32), prefix_len))
        }
        (IpAddr::V6(base), parent_len) => {
            if prefix_len < parent_len || prefix_len > 128 {
                return Err(WapiError::InvalidRequest(format!("cannot carve /{} from {}", prefix_len, parent)));
            }
            // None when the count or step is 2^128
            let count = 1u128.checked_shl(u32::from(prefix_len - parent_len));
            if count.is_some_and(|count| u128::from(index) >= count) {
                return Err(WapiError::Api(format!("No available networks in {}", parent)));
            }
            let step = 1u128.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
            let addr = u128::from(base).wrapping_add(u128::from(index).wrapping_mul(step));
            Ok(format!("{}/{}", Ipv6Addr::from(addr), prefix_len))
        }
    }
}
