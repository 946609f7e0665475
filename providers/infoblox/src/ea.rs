//! Extensible attribute helpers
//!
//! Resources keep their extensible attributes in state as a JSON object
//! string (`ext_attrs`). These helpers convert between that string and an
//! attribute map, and reconcile the user's attributes with the remote set:
//!
//! - `omit_eas`: remote attributes the user does not manage
//! - `merge_eas`: the attribute set to send on update
//! - `exposed_eas`: the attribute set to write back into state on read

use crate::error::{ProviderError, Result};
use ibclient::{EA_TENANT_ID, Ea, ObjectManager, WapiConnector};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Attribute carrying the client-generated internal ID
pub const EA_INTERNAL_ID: &str = "Terraform Internal ID";

/// Attributes that are never exposed as user attributes
pub const RESERVED_EAS: &[&str] = &[EA_INTERNAL_ID, EA_TENANT_ID];

/// Extensible attributes keyed by name
pub type ExtAttrs = BTreeMap<String, Value>;

/// Parse the `ext_attrs` JSON string; an empty string is an empty set
pub fn deserialize_eas(ea_json: &str) -> Result<ExtAttrs> {
    if ea_json.trim().is_empty() {
        return Ok(ExtAttrs::new());
    }

    match serde_json::from_str::<Value>(ea_json) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(ProviderError::EaParse(format!(
            "expected a JSON object, got: {}",
            other
        ))),
        Err(e) => Err(ProviderError::EaParse(e.to_string())),
    }
}

/// Render attributes as a JSON object string with keys in sorted order
pub fn serialize_eas(eas: &ExtAttrs) -> Result<String> {
    Ok(serde_json::to_string(eas)?)
}

/// Remote attributes whose keys are absent from `local`
pub fn omit_eas(remote: &ExtAttrs, local: &ExtAttrs) -> ExtAttrs {
    remote
        .iter()
        .filter(|(key, _)| !local.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Combine remote and local attribute sets for an update
///
/// Keys dropped from the configuration (in `old_local`, not in `new_local`)
/// are removed, configured keys take the configured value, and remote keys
/// that were never managed are kept.
pub fn combine_eas(remote: &ExtAttrs, new_local: &ExtAttrs, old_local: &ExtAttrs) -> ExtAttrs {
    let mut managed = old_local.clone();
    managed.extend(new_local.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut merged = omit_eas(remote, &managed);
    merged.extend(new_local.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Validate `new_local` and merge it into the remote attribute set
///
/// List values are only accepted for attributes whose definition allows
/// multiple values; the definition is fetched through `connector`. Nothing
/// is merged when any value is rejected.
pub async fn merge_eas(
    remote: &ExtAttrs,
    new_local: &ExtAttrs,
    old_local: &ExtAttrs,
    connector: &dyn WapiConnector,
) -> Result<ExtAttrs> {
    let manager = ObjectManager::new(connector, crate::CMP_TYPE, None);

    for (name, value) in new_local {
        if check_ea_value(name, value)? == EaShape::List {
            let definition = manager.get_ea_definition(name).await?.ok_or_else(|| {
                ProviderError::InvalidEaValue(format!(
                    "attribute '{}' has a list value but no definition exists",
                    name
                ))
            })?;
            if !definition.allows_multiple_values() {
                return Err(ProviderError::InvalidEaValue(format!(
                    "attribute '{}' does not allow multiple values",
                    name
                )));
            }
        }
    }

    let merged = combine_eas(remote, new_local, old_local);
    debug!("Merged extensible attributes: {:?}", merged.keys().collect::<Vec<_>>());
    Ok(merged)
}

#[derive(Debug, PartialEq, Eq)]
enum EaShape {
    Scalar,
    List,
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_boolean() || value.is_i64() || value.is_u64()
}

fn check_ea_value(name: &str, value: &Value) -> Result<EaShape> {
    match value {
        v if is_scalar(v) => Ok(EaShape::Scalar),
        Value::Array(items) if items.iter().all(is_scalar) => Ok(EaShape::List),
        Value::Array(_) => Err(ProviderError::InvalidEaValue(format!(
            "attribute '{}' list entries must be strings, booleans or integers",
            name
        ))),
        other => Err(ProviderError::InvalidEaValue(format!(
            "attribute '{}' has unsupported value {}; expected a string, boolean, integer or a list of those",
            name, other
        ))),
    }
}

/// Remote attributes as a plain map
pub fn remote_eas(ea: &Ea) -> ExtAttrs {
    ea.as_map().clone()
}

/// Take the tenant ID out of a user attribute set
pub fn take_tenant_id(eas: &mut ExtAttrs) -> Option<String> {
    eas.remove(EA_TENANT_ID).map(|value| match value {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Attributes to record in state after a read
///
/// Reserved attributes are dropped. With a local set only the keys the user
/// manages are exposed; without one (import) every remote attribute is.
pub fn exposed_eas(remote: &Ea, local: Option<&ExtAttrs>) -> ExtAttrs {
    remote
        .as_map()
        .iter()
        .filter(|(key, _)| !RESERVED_EAS.contains(&key.as_str()))
        .filter(|(key, _)| local.is_none_or(|local| local.contains_key(*key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
#[path = "ea_test.rs"]
mod tests;
