//! Resource lifecycle tests against the in-memory WAPI connector

use ibclient::MockConnector;
use infoblox_provider::{Provider, ProviderError, ResourceData, ResourceState};
use serde_json::{Map, Value, json};
use std::sync::Arc;

const INTERNAL_ID: &str = "Terraform Internal ID";

fn attrs(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn setup() -> (MockConnector, Provider) {
    let mock = MockConnector::default();
    let provider = Provider::new(Arc::new(mock.clone()));
    (mock, provider)
}

async fn create(provider: &Provider, type_name: &str, config: Value) -> ResourceState {
    let mut d = ResourceData::new(attrs(config));
    provider.create(type_name, &mut d).await.unwrap();
    d.into_state()
}

/// Update data the way the CLI builds it: recorded state plus planned configuration
fn planned(provider: &Provider, type_name: &str, state: &ResourceState, config: Value) -> ResourceData {
    let schema = provider.resource_schema(type_name).unwrap();
    let planned = schema.plan(&state.attributes, &attrs(config));
    ResourceData::with_prior(state.id.clone(), state.attributes.clone(), planned)
}

fn remote(mock: &MockConnector, state: &ResourceState) -> Value {
    mock.object(&state.id).unwrap()
}

#[tokio::test]
async fn test_a_record_create_tags_internal_id() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_a_record",
        json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10", "ext_attrs": r#"{"Site":"HQ"}"#}),
    )
    .await;

    assert!(state.id.starts_with("record:a/"));
    assert_eq!(state.attributes["ref"], state.id.as_str());
    assert_eq!(state.attributes["ip_addr"], "10.0.0.10");
    assert_eq!(state.attributes["dns_view"], "default");
    assert_eq!(state.attributes["ttl"], -1);
    assert_eq!(state.attributes["ext_attrs"], r#"{"Site":"HQ"}"#);

    let object = remote(&mock, &state);
    assert_eq!(object["use_ttl"], false);
    assert!(object.get("ttl").is_none());
    assert_eq!(object["extattrs"]["Site"]["value"], "HQ");
    assert_eq!(object["extattrs"][INTERNAL_ID]["value"], state.attributes["internal_id"]);
}

#[tokio::test]
async fn test_a_record_allocates_from_cidr() {
    let (mock, provider) = setup();
    let first = create(&provider, "infoblox_a_record", json!({"fqdn": "a.example.com", "cidr": "10.1.0.0/24"})).await;
    let second = create(&provider, "infoblox_a_record", json!({"fqdn": "b.example.com", "cidr": "10.1.0.0/24"})).await;

    assert_eq!(first.attributes["ip_addr"], "10.1.0.1");
    assert_eq!(second.attributes["ip_addr"], "10.1.0.2");
    assert!(mock.calls().contains(&"create record:a".to_string()));
}

#[tokio::test]
async fn test_a_record_address_xor_cidr() {
    let (_mock, provider) = setup();
    for config in [
        json!({"fqdn": "a.example.com"}),
        json!({"fqdn": "a.example.com", "ip_addr": "10.0.0.1", "cidr": "10.0.0.0/24"}),
        json!({"fqdn": "a.example.com", "cidr": "2001:db8::/64"}),
    ] {
        let mut d = ResourceData::new(attrs(config));
        let err = provider.create("infoblox_a_record", &mut d).await.unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)), "unexpected error: {}", err);
        assert!(d.id().is_empty());
    }
}

#[tokio::test]
async fn test_ttl_round_trip() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_txt_record", json!({"fqdn": "t.example.com", "text": "hello", "ttl": 300})).await;
    assert_eq!(remote(&mock, &state)["ttl"], 300);
    assert_eq!(remote(&mock, &state)["use_ttl"], true);
    assert_eq!(state.attributes["ttl"], 300);

    let mut d = planned(&provider, "infoblox_txt_record", &state, json!({"fqdn": "t.example.com", "text": "hello", "ttl": -1}));
    provider.update("infoblox_txt_record", &mut d).await.unwrap();
    assert_eq!(d.get_i64("ttl"), Some(-1));
    assert_eq!(remote(&mock, &d.clone().into_state())["use_ttl"], false);

    let mut bad = ResourceData::new(attrs(json!({"fqdn": "u.example.com", "text": "x", "ttl": -5})));
    assert!(matches!(
        provider.create("infoblox_txt_record", &mut bad).await,
        Err(ProviderError::Validation(_))
    ));
}

#[tokio::test]
async fn test_update_preserves_out_of_band_attributes() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_cname_record",
        json!({"alias": "www.example.com", "canonical": "web.example.com", "ext_attrs": r#"{"Site":"A"}"#}),
    )
    .await;
    mock.set_ea(&state.id, "Owner", json!("netops"));

    let mut d = planned(
        &provider,
        "infoblox_cname_record",
        &state,
        json!({"alias": "www.example.com", "canonical": "web2.example.com", "ext_attrs": r#"{"Site":"B"}"#, "comment": "moved"}),
    );
    provider.update("infoblox_cname_record", &mut d).await.unwrap();

    assert_eq!(d.get_str("canonical"), Some("web2.example.com"));
    assert_eq!(d.get_str("comment"), Some("moved"));
    assert_eq!(d.get_str("ext_attrs"), Some(r#"{"Site":"B"}"#));
    assert_eq!(d.get_str("internal_id"), state.attributes["internal_id"].as_str());

    let extattrs = &remote(&mock, &state)["extattrs"];
    assert_eq!(extattrs["Site"]["value"], "B");
    assert_eq!(extattrs["Owner"]["value"], "netops");
    assert!(extattrs.get(INTERNAL_ID).is_some());
}

#[tokio::test]
async fn test_update_removes_deleted_attributes() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_mx_record",
        json!({"fqdn": "example.com", "mail_exchanger": "mx1.example.com", "preference": 10, "ext_attrs": r#"{"Site":"A","Location":"HQ"}"#}),
    )
    .await;

    let mut d = planned(
        &provider,
        "infoblox_mx_record",
        &state,
        json!({"fqdn": "example.com", "mail_exchanger": "mx1.example.com", "preference": 20, "ext_attrs": r#"{"Location":"HQ"}"#}),
    );
    provider.update("infoblox_mx_record", &mut d).await.unwrap();

    let object = remote(&mock, &state);
    assert_eq!(object["preference"], 20);
    assert!(object["extattrs"].get("Site").is_none());
    assert_eq!(object["extattrs"]["Location"]["value"], "HQ");
}

#[tokio::test]
async fn test_unmanaged_attributes_survive_repeated_updates() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_txt_record", json!({"fqdn": "t.example.com", "text": "v1"})).await;
    assert_eq!(state.attributes["ext_attrs"], "{}");
    mock.set_ea(&state.id, "Location", json!("HQ"));

    let mut d = planned(&provider, "infoblox_txt_record", &state, json!({"fqdn": "t.example.com", "text": "v2"}));
    provider.update("infoblox_txt_record", &mut d).await.unwrap();
    assert_eq!(d.get_str("ext_attrs"), Some("{}"));
    assert_eq!(remote(&mock, &state)["extattrs"]["Location"]["value"], "HQ");

    let state = d.into_state();
    let mut d = planned(&provider, "infoblox_txt_record", &state, json!({"fqdn": "t.example.com", "text": "v3"}));
    provider.update("infoblox_txt_record", &mut d).await.unwrap();
    assert_eq!(d.get_str("ext_attrs"), Some("{}"));

    let object = remote(&mock, &state);
    assert_eq!(object["text"], "v3");
    assert_eq!(object["extattrs"]["Location"]["value"], "HQ");
    assert_eq!(object["extattrs"][INTERNAL_ID]["value"], state.attributes["internal_id"]);
}

#[tokio::test]
async fn test_omitted_ext_attrs_drops_only_managed_keys() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_cname_record",
        json!({"alias": "app.example.com", "canonical": "web.example.com", "ext_attrs": r#"{"Site":"A"}"#}),
    )
    .await;
    mock.set_ea(&state.id, "Owner", json!("netops"));

    let mut d = planned(
        &provider,
        "infoblox_cname_record",
        &state,
        json!({"alias": "app.example.com", "canonical": "web.example.com"}),
    );
    provider.update("infoblox_cname_record", &mut d).await.unwrap();
    assert_eq!(d.get_str("ext_attrs"), Some("{}"));

    let extattrs = &remote(&mock, &state)["extattrs"];
    assert!(extattrs.get("Site").is_none());
    assert_eq!(extattrs["Owner"]["value"], "netops");
    assert!(extattrs.get(INTERNAL_ID).is_some());
}

#[tokio::test]
async fn test_failed_update_rolls_back_state() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_a_record", json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10"})).await;

    let mut d = planned(
        &provider,
        "infoblox_a_record",
        &state,
        json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.11", "comment": "new"}),
    );
    let before = d.clone();
    mock.fail_next("update", "AdmConProtoError: IB.Data.Conflict");

    let err = provider.update("infoblox_a_record", &mut d).await.unwrap_err();
    assert!(err.to_string().contains("IB.Data.Conflict"));
    assert_eq!(d, before);
    assert_eq!(remote(&mock, &state)["ipv4addr"], "10.0.0.10");
}

#[tokio::test]
async fn test_immutable_attribute_change_is_rejected() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_a_record", json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10"})).await;

    let mut d = planned(
        &provider,
        "infoblox_a_record",
        &state,
        json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10", "dns_view": "internal"}),
    );
    let err = provider.update("infoblox_a_record", &mut d).await.unwrap_err();
    assert!(err.to_string().contains("changing the value of 'dns_view' field is not allowed"));
    assert!(!mock.calls().iter().any(|c| c.starts_with("update ")));
}

#[tokio::test]
async fn test_read_follows_renamed_reference() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_a_record", json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10"})).await;
    let new_ref = mock.rename_ref(&state.id).unwrap();

    let mut d = ResourceData::from_state(state);
    provider.read("infoblox_a_record", &mut d).await.unwrap();
    assert_eq!(d.id(), new_ref);
    assert_eq!(d.get_str("ref"), Some(new_ref.as_str()));
}

#[tokio::test]
async fn test_read_of_deleted_object_clears_id() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_a_record", json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10"})).await;
    let mut d = ResourceData::from_state(state.clone());

    let mut delete = ResourceData::from_state(state);
    provider.delete("infoblox_a_record", &mut delete).await.unwrap();
    assert!(delete.id().is_empty());
    assert!(mock.objects_of_type("record:a").is_empty());

    provider.read("infoblox_a_record", &mut d).await.unwrap();
    assert!(d.id().is_empty());
}

#[tokio::test]
async fn test_delete_of_missing_object_succeeds() {
    let (_mock, provider) = setup();
    let mut d = ResourceData::from_state(ResourceState {
        id: "record:a/ZG5zLmdvbmU:gone.example.com/default".to_string(),
        attributes: attrs(json!({"fqdn": "gone.example.com", "internal_id": "0b8f1c2e-6a43-4d55-9f0e-3c2d1b4a5e6f"})),
    });
    provider.delete("infoblox_a_record", &mut d).await.unwrap();
    assert!(d.id().is_empty());
}

#[tokio::test]
async fn test_import_tags_untagged_object() {
    let (mock, provider) = setup();
    let reference = mock.add_object(
        "record:a",
        json!({"name": "legacy.example.com", "ipv4addr": "10.0.0.50", "view": "default", "use_ttl": false, "extattrs": {"Site": {"value": "DC1"}}}),
    );

    let mut d = ResourceData::for_import(reference.clone());
    provider.import("infoblox_a_record", &mut d).await.unwrap();

    let internal_id = d.get_string("internal_id");
    assert!(!internal_id.is_empty());
    assert_eq!(d.get_str("fqdn"), Some("legacy.example.com"));
    assert_eq!(d.get_str("ext_attrs"), Some(r#"{"Site":"DC1"}"#));
    assert_eq!(mock.object(&reference).unwrap()["extattrs"][INTERNAL_ID]["value"], internal_id.as_str());

    let mut again = ResourceData::for_import(reference);
    provider.import("infoblox_a_record", &mut again).await.unwrap();
    assert_eq!(again.get_string("internal_id"), internal_id);
}

#[tokio::test]
async fn test_import_of_unknown_reference() {
    let (_mock, provider) = setup();
    let mut d = ResourceData::for_import("record:a/ZG5zLm5vbmU:none.example.com/default");
    assert!(matches!(
        provider.import("infoblox_a_record", &mut d).await,
        Err(ProviderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_tenant_id_is_stamped_and_hidden() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_aaaa_record",
        json!({"fqdn": "v6.example.com", "ipv6_addr": "2001:db8::10", "ext_attrs": r#"{"Tenant ID":"t-42","Site":"HQ"}"#}),
    )
    .await;

    let extattrs = &remote(&mock, &state)["extattrs"];
    assert_eq!(extattrs["Tenant ID"]["value"], "t-42");
    assert_eq!(extattrs["CMP Type"]["value"], "Terraform");
    assert_eq!(state.attributes["ext_attrs"], r#"{"Site":"HQ"}"#);
}

#[tokio::test]
async fn test_ptr_record_by_address_or_name() {
    let (mock, provider) = setup();
    let v4 = create(&provider, "infoblox_ptr_record", json!({"ptrdname": "host.example.com", "ip_addr": "10.0.0.5"})).await;
    let v6 = create(&provider, "infoblox_ptr_record", json!({"ptrdname": "host6.example.com", "ip_addr": "2001:db8::5"})).await;
    let by_name = create(
        &provider,
        "infoblox_ptr_record",
        json!({"ptrdname": "named.example.com", "record_name": "7.0.0.10.in-addr.arpa"}),
    )
    .await;

    assert_eq!(remote(&mock, &v4)["ipv4addr"], "10.0.0.5");
    assert_eq!(remote(&mock, &v6)["ipv6addr"], "2001:db8::5");
    assert_eq!(remote(&mock, &by_name)["name"], "7.0.0.10.in-addr.arpa");
    assert_eq!(by_name.attributes["record_name"], "7.0.0.10.in-addr.arpa");

    let mut both = ResourceData::new(attrs(json!({"ptrdname": "x.example.com", "ip_addr": "10.0.0.6", "record_name": "6.0.0.10.in-addr.arpa"})));
    assert!(provider.create("infoblox_ptr_record", &mut both).await.is_err());
}

#[tokio::test]
async fn test_srv_record_validation() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_srv_record",
        json!({"name": "_sip._tcp.example.com", "priority": 10, "weight": 60, "port": 5060, "target": "sip.example.com"}),
    )
    .await;
    assert_eq!(remote(&mock, &state)["port"], 5060);

    for config in [
        json!({"name": "sip._tcp.example.com", "priority": 10, "weight": 60, "port": 5060, "target": "sip.example.com"}),
        json!({"name": "_sip._tcp.example.com", "priority": 10, "weight": 60, "port": 70000, "target": "sip.example.com"}),
        json!({"name": "_sip._tcp.example.com", "priority": 10, "weight": 60, "port": 5060, "target": "bad..host"}),
    ] {
        let mut d = ResourceData::new(attrs(config));
        assert!(matches!(
            provider.create("infoblox_srv_record", &mut d).await,
            Err(ProviderError::Validation(_))
        ));
    }
}

#[tokio::test]
async fn test_ns_record_has_no_internal_id() {
    let (mock, provider) = setup();
    let state = create(
        &provider,
        "infoblox_ns_record",
        json!({"name": "example.com", "nameserver": "ns1.example.com", "addresses": [{"address": "10.0.0.53"}]}),
    )
    .await;

    let object = remote(&mock, &state);
    assert!(object.get("extattrs").is_none());
    assert!(!state.attributes.contains_key("internal_id"));
    assert_eq!(state.attributes["addresses"], json!([{"address": "10.0.0.53", "auto_create_ptr": false}]));
}

#[tokio::test]
async fn test_zone_auth_format_is_checked() {
    let (_mock, provider) = setup();
    let state = create(&provider, "infoblox_zone_auth", json!({"fqdn": "example.com", "ns_group": "default-ns"})).await;
    assert_eq!(state.attributes["zone_format"], "FORWARD");
    assert_eq!(state.attributes["view"], "default");

    let mut d = ResourceData::new(attrs(json!({"fqdn": "10.0.0.0/24", "zone_format": "REVERSE"})));
    assert!(provider.create("infoblox_zone_auth", &mut d).await.is_err());
}

#[tokio::test]
async fn test_network_allocation_and_family_dispatch() {
    let (mock, provider) = setup();
    let allocated = create(
        &provider,
        "infoblox_network",
        json!({"parent_cidr": "10.0.0.0/16", "allocate_prefix_len": 24, "comment": "app tier"}),
    )
    .await;
    assert_eq!(allocated.attributes["cidr"], "10.0.0.0/24");
    assert!(allocated.id.starts_with("network/"));

    let v6 = create(&provider, "infoblox_network", json!({"cidr": "2001:db8:1::/64"})).await;
    assert!(v6.id.starts_with("ipv6network/"));

    let mut d = planned(&provider, "infoblox_network", &allocated, json!({"parent_cidr": "10.0.0.0/16", "allocate_prefix_len": 24, "comment": "web tier"}));
    provider.update("infoblox_network", &mut d).await.unwrap();
    assert_eq!(d.get_str("cidr"), Some("10.0.0.0/24"));
    assert_eq!(remote(&mock, &allocated)["comment"], "web tier");

    let mut too_long = ResourceData::new(attrs(json!({"parent_cidr": "10.0.0.0/16", "allocate_prefix_len": 8})));
    assert!(provider.create("infoblox_network", &mut too_long).await.is_err());
}

#[tokio::test]
async fn test_dtc_objects_resolve_names() {
    let (mock, provider) = setup();
    create(&provider, "infoblox_dtc_server", json!({"name": "server1", "host": "10.0.0.21"})).await;
    create(&provider, "infoblox_zone_auth", json!({"fqdn": "example.com"})).await;

    let pool = create(
        &provider,
        "infoblox_dtc_pool",
        json!({"name": "pool1", "lb_preferred_method": "ROUND_ROBIN", "servers": [{"server": "server1", "ratio": 2}]}),
    )
    .await;
    assert!(remote(&mock, &pool)["servers"][0]["server"].as_str().unwrap().starts_with("dtc:server/"));
    assert_eq!(pool.attributes["servers"], json!([{"server": "server1", "ratio": 2}]));

    let lbdn = create(
        &provider,
        "infoblox_dtc_lbdn",
        json!({"name": "www-lbdn", "lb_method": "RATIO", "pools": [{"pool": "pool1"}], "auth_zones": ["example.com"], "patterns": ["www.example.com"], "types": ["A"]}),
    )
    .await;
    assert_eq!(lbdn.attributes["pools"], json!([{"pool": "pool1", "ratio": 1}]));
    assert_eq!(lbdn.attributes["auth_zones"], json!(["example.com"]));

    let mut missing = ResourceData::new(attrs(
        json!({"name": "pool2", "lb_preferred_method": "RATIO", "servers": [{"server": "nope"}]}),
    ));
    let err = provider.create("infoblox_dtc_pool", &mut missing).await.unwrap_err();
    assert!(err.to_string().contains("DTC server 'nope' does not exist"));
}

#[tokio::test]
async fn test_zone_ns_group_can_be_removed() {
    let (mock, provider) = setup();
    let state = create(&provider, "infoblox_zone_auth", json!({"fqdn": "example.org", "ns_group": "grp1"})).await;
    assert_eq!(remote(&mock, &state)["ns_group"], "grp1");

    let mut d = planned(&provider, "infoblox_zone_auth", &state, json!({"fqdn": "example.org", "ns_group": "grp2"}));
    provider.update("infoblox_zone_auth", &mut d).await.unwrap();
    assert_eq!(d.get_str("ns_group"), Some("grp2"));
    assert_eq!(remote(&mock, &state)["ns_group"], "grp2");

    let state = d.into_state();
    let mut d = planned(&provider, "infoblox_zone_auth", &state, json!({"fqdn": "example.org"}));
    provider.update("infoblox_zone_auth", &mut d).await.unwrap();
    assert!(!d.contains("ns_group"));
    assert_eq!(remote(&mock, &state).get("ns_group"), Some(&Value::Null));
}

#[tokio::test]
async fn test_lbdn_auth_zones_in_other_views() {
    let (mock, provider) = setup();
    create(&provider, "infoblox_zone_auth", json!({"fqdn": "example.com", "view": "internal"})).await;
    create(&provider, "infoblox_zone_auth", json!({"fqdn": "10.0.0.0/24", "zone_format": "IPV4"})).await;

    let lbdn = create(
        &provider,
        "infoblox_dtc_lbdn",
        json!({"name": "int-lbdn", "lb_method": "ROUND_ROBIN", "auth_zones": ["example.com"], "dns_view": "internal"}),
    )
    .await;
    assert_eq!(lbdn.attributes["auth_zones"], json!(["example.com"]));
    assert_eq!(lbdn.attributes["dns_view"], "internal");
    assert!(remote(&mock, &lbdn)["auth_zones"][0].as_str().unwrap().ends_with(":example.com/internal"));

    let reverse = create(
        &provider,
        "infoblox_dtc_lbdn",
        json!({"name": "rev-lbdn", "lb_method": "ROUND_ROBIN", "auth_zones": ["10.0.0.0/24"]}),
    )
    .await;
    assert_eq!(reverse.attributes["auth_zones"], json!(["10.0.0.0/24"]));

    let mut wrong_view = ResourceData::new(attrs(
        json!({"name": "ext-lbdn", "lb_method": "ROUND_ROBIN", "auth_zones": ["example.com"]}),
    ));
    let err = provider.create("infoblox_dtc_lbdn", &mut wrong_view).await.unwrap_err();
    assert!(err.to_string().contains("zone 'example.com' does not exist in view 'default'"));
}

#[tokio::test]
async fn test_data_source_lists_created_records() {
    let (_mock, provider) = setup();
    create(&provider, "infoblox_a_record", json!({"fqdn": "www.example.com", "ip_addr": "10.0.0.10", "ext_attrs": r#"{"Site":"HQ"}"#})).await;
    create(&provider, "infoblox_a_record", json!({"fqdn": "db.example.com", "ip_addr": "10.0.0.11", "ext_attrs": r#"{"Site":"DR"}"#})).await;

    let mut d = ResourceData::new(attrs(json!({"filters": {"*Site": "HQ"}})));
    provider.read_data_source("infoblox_a_record", &mut d).await.unwrap();
    let results = d.get_list("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["fqdn"], "www.example.com");
}
