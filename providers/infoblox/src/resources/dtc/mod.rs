//! DNS traffic control: servers, pools and load-balanced domain names
//!
//! Pools list their servers and LBDNs their pools and zones by name; the
//! handlers resolve those names to references before writing and map the
//! references back to names on read.

mod lbdn;
mod pool;
mod server;

pub use lbdn::DtcLbdnHandler;
pub use pool::DtcPoolHandler;
pub use server::DtcServerHandler;

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use crate::resources::common::ref_display_name;
use serde_json::{Map, Value};

/// `(name, ratio)` members of a list attribute such as `servers` or `pools`
pub(crate) fn members(d: &ResourceData, field: &str, key: &str) -> Result<Vec<(String, u32)>> {
    d.get_list(field)
        .iter()
        .map(|entry| {
            let name = entry
                .get(key)
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| ProviderError::validation(format!("every entry of '{}' needs a '{}'", field, key)))?;
            let ratio = match entry.get("ratio") {
                None | Some(Value::Null) => 1,
                Some(ratio) => ratio
                    .as_u64()
                    .and_then(|r| u32::try_from(r).ok())
                    .filter(|r| *r > 0)
                    .ok_or_else(|| ProviderError::validation(format!("'{}.ratio' must be a positive integer", field)))?,
            };
            Ok((name.to_string(), ratio))
        })
        .collect()
}

/// State entry for a member given by reference
pub(crate) fn member_entry(key: &str, reference: &str, ratio: u32) -> Value {
    let mut entry = Map::new();
    entry.insert(key.to_string(), Value::from(ref_display_name(reference).unwrap_or(reference)));
    entry.insert("ratio".to_string(), Value::from(ratio));
    Value::Object(entry)
}

/// Name is one of `allowed`
pub(crate) fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ProviderError::validation(format!(
        "'{}' must be one of {}, got '{}'",
        field,
        allowed.join(", "),
        value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_members_default_ratio() {
        let d = ResourceData::new(
            json!({"servers": [{"server": "s1"}, {"server": "s2", "ratio": 3}]})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(
            members(&d, "servers", "server").unwrap(),
            vec![("s1".to_string(), 1), ("s2".to_string(), 3)]
        );
    }

    #[test]
    fn test_members_rejects_bad_entries() {
        let missing = ResourceData::new(json!({"servers": [{"ratio": 2}]}).as_object().cloned().unwrap());
        let zero = ResourceData::new(json!({"servers": [{"server": "s1", "ratio": 0}]}).as_object().cloned().unwrap());
        assert!(members(&missing, "servers", "server").is_err());
        assert!(members(&zero, "servers", "server").is_err());
    }

    #[test]
    fn test_member_entry_uses_display_name() {
        assert_eq!(
            member_entry("pool", "dtc:pool/ZG5zLmlkbnNfcG9vbA:pool1", 2),
            json!({"pool": "pool1", "ratio": 2})
        );
    }
}
