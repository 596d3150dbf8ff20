//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading and validation.

use std::io::Write as _;

use coopcache_core::ClusterError;
use coopcache_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.coordinator.cache_size, 64);
    assert_eq!(config.coordinator.disk_size, 1024);
    assert_eq!(config.client.count, 8);
    assert_eq!(config.client.cache_size, 16);
    assert_eq!(config.workload.requests, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cost_defaults() {
    let config = Config::default();
    assert_eq!(config.coordinator.cache_reference_cost, 1);
    assert_eq!(config.coordinator.disk_to_cache_cost, 100);
    assert_eq!(config.coordinator.network_hop_cost, 10);
    assert_eq!(config.client.cache_reference_cost, 1);
    assert_eq!(config.client.network_hop_cost, 10);
    assert!(!config.coordinator.promote_disk_reads);
}

#[test]
fn test_enum_defaults() {
    assert_eq!(InsertPolicyKind::default(), InsertPolicyKind::Aging);
    assert_eq!(Distribution::default(), Distribution::Uniform);
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.client.count, Config::default().client.count);
    assert_eq!(config.workload.seed, Config::default().workload.seed);
}

#[test]
fn test_hot_set_fills_missing_fields() {
    let config =
        Config::from_json_str(r#"{ "workload": { "distribution": { "kind": "HotSet" } } }"#)
            .unwrap();
    assert_eq!(
        config.workload.distribution,
        Distribution::HotSet {
            hot_fraction: 0.1,
            hot_probability: 0.9
        }
    );
}

#[test]
fn test_json_round_trip_through_serialize() {
    let mut config = Config::default();
    config.client.policy = InsertPolicyKind::Bypass;
    config.coordinator.promote_disk_reads = true;
    let json = serde_json::to_string(&config).unwrap();
    let parsed = Config::from_json_str(&json).unwrap();
    assert_eq!(parsed.client.policy, InsertPolicyKind::Bypass);
    assert!(parsed.coordinator.promote_disk_reads);
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ClusterError::Json(_)));
}

#[test]
fn test_unknown_policy_rejected() {
    let err = Config::from_json_str(r#"{ "client": { "policy": "Lru" } }"#).unwrap_err();
    assert!(matches!(err, ClusterError::Json(_)));
}

#[rstest]
#[case::zero_disk(r#"{ "coordinator": { "disk_size": 0 } }"#)]
#[case::zero_clients(r#"{ "client": { "count": 0 } }"#)]
#[case::zero_client_cache(r#"{ "client": { "cache_size": 0 } }"#)]
#[case::clients_exceed_disk(r#"{ "coordinator": { "disk_size": 32 }, "client": { "count": 4, "cache_size": 16 } }"#)]
#[case::coordinator_exceeds_disk(r#"{ "coordinator": { "cache_size": 128, "disk_size": 64 }, "client": { "count": 1 } }"#)]
#[case::hot_fraction_zero(r#"{ "workload": { "distribution": { "kind": "HotSet", "hot_fraction": 0.0 } } }"#)]
#[case::hot_fraction_above_one(r#"{ "workload": { "distribution": { "kind": "HotSet", "hot_fraction": 1.5 } } }"#)]
#[case::hot_probability_negative(r#"{ "workload": { "distribution": { "kind": "HotSet", "hot_probability": -0.1 } } }"#)]
fn test_invalid_config(#[case] json: &str) {
    let err = Config::from_json_str(json).unwrap_err();
    assert!(matches!(err, ClusterError::InvalidConfig(_)), "{err}");
}

#[test]
fn test_zero_coordinator_cache_is_valid() {
    let config = Config::from_json_str(r#"{ "coordinator": { "cache_size": 0 } }"#).unwrap();
    assert_eq!(config.coordinator.cache_size, 0);
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "client": {{ "count": 2, "cache_size": 4 }}, "workload": {{ "requests": 7, "seed": 99 }} }}"#
    )
    .unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.client.count, 2);
    assert_eq!(config.client.cache_size, 4);
    assert_eq!(config.workload.requests, 7);
    assert_eq!(config.workload.seed, 99);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ClusterError::Io(_)));
}
