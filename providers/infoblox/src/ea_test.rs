//! Unit and property tests for the extensible attribute helpers

use super::{
    EA_INTERNAL_ID, ExtAttrs, combine_eas, deserialize_eas, exposed_eas, merge_eas, omit_eas,
    serialize_eas, take_tenant_id,
};
use crate::error::ProviderError;
use ibclient::{EA_TENANT_ID, Ea, MockConnector};
use proptest::prelude::*;
use serde_json::{Value, json};

fn eas(value: Value) -> ExtAttrs {
    value.as_object().cloned().unwrap().into_iter().collect()
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 ._-]{0,12}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
    ]
}

fn arb_eas() -> impl Strategy<Value = ExtAttrs> {
    prop::collection::btree_map("[A-Z][a-z]{0,5}( [A-Z][a-z]{0,3})?", arb_value(), 0..8)
}

proptest! {
    /// Serializing a parsed attribute string yields the same pairs
    #[test]
    fn serialize_deserialize_round_trip(input in arb_eas()) {
        let text = serde_json::to_string(&input).unwrap();
        let parsed = deserialize_eas(&text).unwrap();
        let reparsed: Value = serde_json::from_str(&serialize_eas(&parsed).unwrap()).unwrap();
        let original: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(reparsed, original);
    }

    /// Keys removed from the configuration never survive a merge
    #[test]
    fn merge_honors_deletions(remote in arb_eas(), new in arb_eas(), old in arb_eas()) {
        let merged = combine_eas(&remote, &new, &old);
        for key in old.keys().filter(|k| !new.contains_key(*k)) {
            prop_assert!(!merged.contains_key(key), "deleted key {} survived", key);
        }
    }

    /// Configured keys always carry the configured value
    #[test]
    fn merge_user_values_win(remote in arb_eas(), new in arb_eas(), old in arb_eas()) {
        let merged = combine_eas(&remote, &new, &old);
        for (key, value) in &new {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }

    /// Omitting is exactly the key set difference
    #[test]
    fn omit_is_set_difference(remote in arb_eas(), local in arb_eas()) {
        let omitted = omit_eas(&remote, &local);
        let expected: Vec<&String> = remote.keys().filter(|k| !local.contains_key(*k)).collect();
        prop_assert_eq!(omitted.keys().collect::<Vec<_>>(), expected);
        for (key, value) in &omitted {
            prop_assert_eq!(remote.get(key), Some(value));
        }
    }
}

#[test]
fn test_deserialize_empty_and_malformed() {
    assert!(deserialize_eas("").unwrap().is_empty());
    assert!(deserialize_eas("   ").unwrap().is_empty());
    assert!(matches!(deserialize_eas("{\"Site\": "), Err(ProviderError::EaParse(_))));
    assert!(matches!(deserialize_eas("[1, 2]"), Err(ProviderError::EaParse(_))));
}

#[test]
fn test_serialize_sorts_keys() {
    let text = serialize_eas(&eas(json!({"Site": "A", "Location": "HQ"}))).unwrap();
    assert_eq!(text, r#"{"Location":"HQ","Site":"A"}"#);
}

#[tokio::test]
async fn test_merge_drops_deleted_and_keeps_unmanaged() {
    let mock = MockConnector::default();
    let remote = eas(json!({"Location": "HQ", "Site": "A"}));
    let old = eas(json!({"Site": "A"}));
    let new = ExtAttrs::new();

    let merged = merge_eas(&remote, &new, &old, &mock).await.unwrap();
    assert_eq!(merged, eas(json!({"Location": "HQ"})));
}

#[tokio::test]
async fn test_merge_keeps_reserved_remote_attributes() {
    let mock = MockConnector::default();
    let mut remote = eas(json!({"Site": "A"}));
    remote.insert(EA_INTERNAL_ID.to_string(), json!("9a4e6f0e-6f55-4b8e-8a0c-4a5a8f4f7e21"));
    let old = eas(json!({"Site": "A"}));
    let new = eas(json!({"Site": "B"}));

    let merged = merge_eas(&remote, &new, &old, &mock).await.unwrap();
    assert_eq!(merged[EA_INTERNAL_ID], "9a4e6f0e-6f55-4b8e-8a0c-4a5a8f4f7e21");
    assert_eq!(merged["Site"], "B");
}

#[tokio::test]
async fn test_merge_rejects_malformed_values() {
    let mock = MockConnector::default();
    for bad in [json!({"k": "v"}), json!(null), json!(1.5), json!([["nested"]])] {
        let new = eas(json!({"Site": bad}));
        let err = merge_eas(&ExtAttrs::new(), &new, &ExtAttrs::new(), &mock).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidEaValue(_)), "accepted {:?}", new);
    }
}

#[tokio::test]
async fn test_merge_checks_list_values_against_definition() {
    let mock = MockConnector::default();
    mock.add_object("extensibleattributedef", json!({"name": "Owners", "type": "STRING", "flags": "M"}));
    mock.add_object("extensibleattributedef", json!({"name": "Site", "type": "STRING"}));

    let new = eas(json!({"Owners": ["alice", "bob"]}));
    let merged = merge_eas(&ExtAttrs::new(), &new, &ExtAttrs::new(), &mock).await.unwrap();
    assert_eq!(merged["Owners"], json!(["alice", "bob"]));

    let new = eas(json!({"Site": ["A", "B"]}));
    let err = merge_eas(&ExtAttrs::new(), &new, &ExtAttrs::new(), &mock).await.unwrap_err();
    assert!(err.to_string().contains("does not allow multiple values"));

    let new = eas(json!({"Unknown": ["x"]}));
    let err = merge_eas(&ExtAttrs::new(), &new, &ExtAttrs::new(), &mock).await.unwrap_err();
    assert!(err.to_string().contains("no definition"));
}

#[test]
fn test_exposed_eas_strips_reserved_and_filters_to_managed() {
    let mut remote = Ea::new();
    remote.insert(EA_INTERNAL_ID, "9a4e6f0e-6f55-4b8e-8a0c-4a5a8f4f7e21");
    remote.insert(EA_TENANT_ID, "tenant-1");
    remote.insert("Site", "A");
    remote.insert("Location", "HQ");

    let local = eas(json!({"Site": "old"}));
    assert_eq!(exposed_eas(&remote, Some(&local)), eas(json!({"Site": "A"})));
    assert_eq!(exposed_eas(&remote, None), eas(json!({"Site": "A", "Location": "HQ"})));
}

#[test]
fn test_take_tenant_id() {
    let mut local = eas(json!({"Tenant ID": "tenant-1", "Site": "A"}));
    assert_eq!(take_tenant_id(&mut local).as_deref(), Some("tenant-1"));
    assert!(!local.contains_key(EA_TENANT_ID));
    assert_eq!(take_tenant_id(&mut local), None);
}
