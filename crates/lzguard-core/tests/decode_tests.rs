//! Schema decoding against landing-zone shapes.
//!
//! - Defaults are filled and survive a re-encode
//! - Every field failure is reported, not just the first
//! - Decoding a decoded-then-encoded tree is a fixed point

#![allow(clippy::unwrap_used, clippy::expect_used)]

use lzguard_core::landing_zone::network::vpc;
use lzguard_core::schema::decode::decode;
use lzguard_core::schema::refine::{AVAILABILITY_ZONES, REGIONS};
use lzguard_core::value::ConfigValue;
use proptest::prelude::*;
use serde_json::{json, Value};

fn minimal_vpc() -> Value {
    json!({
        "deploy": "local",
        "name": "Endpoint",
        "region": "ca-central-1",
        "cidr": [{"value": "10.2.0.0/16"}]
    })
}

// --- defaults ---

#[test]
fn test_vpc_defaults_are_filled() {
    let decoded = decode(&vpc(), &minimal_vpc()).unwrap();

    assert_eq!(decoded.get("cidr-src").and_then(ConfigValue::as_str), Some("provided"));
    assert_eq!(decoded.get("flow-logs").and_then(ConfigValue::as_str), Some("NONE"));
    assert_eq!(decoded.get("igw").and_then(ConfigValue::as_bool), Some(false));
    assert_eq!(
        decoded
            .get_path(&["cidr"])
            .and_then(ConfigValue::as_sequence)
            .and_then(|s| s.first())
            .and_then(|c| c.get("pool"))
            .and_then(ConfigValue::as_str),
        Some("main")
    );
}

#[test]
fn test_optional_fields_stay_absent() {
    let decoded = decode(&vpc(), &minimal_vpc()).unwrap();
    assert!(decoded.get("subnets").is_none());
    assert!(decoded.get("vgw").is_none());
}

#[test]
fn test_null_treated_as_absent() {
    let mut doc = minimal_vpc();
    doc["igw"] = Value::Null;
    doc["description"] = Value::Null;

    let decoded = decode(&vpc(), &doc).unwrap();
    assert_eq!(decoded.get("igw").and_then(ConfigValue::as_bool), Some(false));
    assert!(decoded.get("description").is_none());
}

#[test]
fn test_unknown_fields_dropped() {
    let mut doc = minimal_vpc();
    doc["not-a-field"] = json!(true);

    let decoded = decode(&vpc(), &doc).unwrap();
    assert!(decoded.get("not-a-field").is_none());
}

// --- failures ---

#[test]
fn test_all_field_failures_reported() {
    let doc = json!({
        "deploy": "local",
        "region": "mars-north-1",
        "cidr": [{"value": "10.2.0.0/33"}]
    });

    let err = decode(&vpc(), &doc).unwrap_err();
    let paths: Vec<String> = err.errors.iter().map(|e| e.path.render()).collect();

    assert!(paths.contains(&"name".to_string()), "{:?}", paths);
    assert!(paths.contains(&"region".to_string()), "{:?}", paths);
    assert!(paths.contains(&"cidr/0/value".to_string()), "{:?}", paths);
}

#[test]
fn test_region_refinement_message() {
    let mut doc = minimal_vpc();
    doc["region"] = json!("mars-north-1");

    let err = decode(&vpc(), &doc).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(
        err.errors[0].message.as_deref(),
        Some("Value should be an AWS region.")
    );
}

#[test]
fn test_empty_name_rejected() {
    let mut doc = minimal_vpc();
    doc["name"] = json!("");

    let err = decode(&vpc(), &doc).unwrap_err();
    assert_eq!(err.errors[0].path.render(), "name");
    assert_eq!(err.errors[0].message.as_deref(), Some("Value can not be empty."));
}

#[test]
fn test_wrong_container_type_reported_at_path() {
    let mut doc = minimal_vpc();
    doc["subnets"] = json!({"Web": {}});

    let err = decode(&vpc(), &doc).unwrap_err();
    assert_eq!(err.errors[0].path.render(), "subnets");
}

// --- fixed point ---

fn cidr() -> impl Strategy<Value = String> {
    (0u8..=255, 0u8..=255, 8u8..=28).prop_map(|(a, b, prefix)| format!("10.{}.{}.0/{}", a, b, prefix))
}

fn subnet() -> impl Strategy<Value = Value> {
    (
        "[A-Z][a-z]{2,6}",
        prop::sample::select(AVAILABILITY_ZONES),
        any::<bool>(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(name, az, share, disabled)| {
            let mut definition = json!({"az": az, "route-table": format!("{}_Shared", name)});
            if let Some(disabled) = disabled {
                definition["disabled"] = json!(disabled);
            }
            json!({
                "name": name,
                "share-to-ou-accounts": share,
                "definitions": [definition]
            })
        })
}

fn vpc_document() -> impl Strategy<Value = Value> {
    (
        "[A-Z][a-z]{2,8}",
        prop::sample::select(REGIONS),
        prop::collection::vec(cidr(), 0..3),
        any::<bool>(),
        prop::option::of(any::<bool>()),
        prop::collection::vec(subnet(), 0..3),
    )
        .prop_map(|(name, region, cidrs, igw, tenancy, subnets)| {
            let mut doc = json!({
                "deploy": "local",
                "name": name,
                "region": region,
                "cidr": cidrs.iter().map(|c| json!({"value": c})).collect::<Vec<_>>(),
                "igw": igw,
                "subnets": subnets
            });
            if let Some(tenancy) = tenancy {
                doc["dedicated-tenancy"] = json!(tenancy);
            }
            doc
        })
}

proptest! {
    #[test]
    fn decode_is_a_fixed_point(doc in vpc_document()) {
        let once = decode(&vpc(), &doc).unwrap();
        let twice = decode(&vpc(), &once.to_json()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn decoded_tree_keeps_input_values(doc in vpc_document()) {
        let decoded = decode(&vpc(), &doc).unwrap();
        prop_assert_eq!(decoded.get("name").and_then(ConfigValue::as_str), doc["name"].as_str());
        prop_assert_eq!(decoded.get("region").and_then(ConfigValue::as_str), doc["region"].as_str());
        prop_assert_eq!(decoded.get("igw").and_then(ConfigValue::as_bool), doc["igw"].as_bool());
    }
}
