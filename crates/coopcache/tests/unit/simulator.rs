//! # Simulator Tests
//!
//! Whole runs over small configurations.

use coopcache_core::config::{Config, Distribution, InsertPolicyKind};
use coopcache_core::sim::Workload;
use coopcache_core::{Block, Simulator};
use pretty_assertions::assert_eq;

use crate::common::harness::init_tracing;

fn small_config() -> Config {
    let mut config = Config::default();
    config.coordinator.cache_size = 8;
    config.coordinator.disk_size = 64;
    config.client.count = 4;
    config.client.cache_size = 4;
    config.workload.requests = 500;
    config.workload.seed = 11;
    config
}

#[test]
fn test_totals_are_consistent() {
    init_tracing();
    let mut sim = Simulator::new(&small_config()).unwrap();
    let stats = sim.run().unwrap().clone();

    assert_eq!(stats.requests, 500);
    assert_eq!(stats.local_hits + stats.global_hits + stats.misses, 500);
    assert_eq!(stats.peer_hits + stats.coordinator_hits, stats.global_hits);
    assert!(stats.total_cost > 0);
    assert_eq!(stats.stale_probes, sim.cluster.stale_probes());
}

#[test]
fn test_initial_refresh_counted() {
    let sim = Simulator::new(&small_config()).unwrap();
    assert_eq!(sim.stats().summary_refreshes, 4);
    assert_eq!(sim.catalogue().len(), 64);
    assert_eq!(sim.catalogue()[0].data(), "block-0");
}

#[test]
fn test_warm_up_layout() {
    let sim = Simulator::new(&small_config()).unwrap();
    let first: Vec<&str> = sim.cluster.nodes()[1]
        .cache()
        .blocks()
        .map(Block::data)
        .collect();
    assert_eq!(first, vec!["block-4", "block-5", "block-6", "block-7"]);

    let coordinator = sim.cluster.coordinator().cache();
    assert!(coordinator.lookup(Block::new("block-63").id()).is_some());
    assert!(coordinator.lookup(Block::new("block-56").id()).is_some());
    assert!(coordinator.lookup(Block::new("block-55").id()).is_none());
}

#[test]
fn test_same_seed_same_run() {
    let config = small_config();
    let mut a = Simulator::new(&config).unwrap();
    let mut b = Simulator::new(&config).unwrap();
    let sa = a.run().unwrap().clone();
    let sb = b.run().unwrap().clone();

    assert_eq!(sa.total_cost, sb.total_cost);
    assert_eq!(
        (sa.local_hits, sa.global_hits, sa.misses, sa.stale_probes),
        (sb.local_hits, sb.global_hits, sb.misses, sb.stale_probes)
    );
}

#[test]
fn test_bypass_never_changes_client_caches() {
    let mut config = small_config();
    config.client.policy = InsertPolicyKind::Bypass;
    let mut sim = Simulator::new(&config).unwrap();
    let before: Vec<Vec<Block>> = sim
        .cluster
        .nodes()
        .iter()
        .map(|n| n.cache().blocks().cloned().collect())
        .collect();

    let stats = sim.run().unwrap().clone();

    let after: Vec<Vec<Block>> = sim
        .cluster
        .nodes()
        .iter()
        .map(|n| n.cache().blocks().cloned().collect())
        .collect();
    assert_eq!(before, after);
    assert_eq!(stats.stale_probes, 0);
}

#[test]
fn test_hot_set_workload_stays_in_bounds() {
    let workload = Workload::new(
        3,
        100,
        Distribution::HotSet {
            hot_fraction: 0.05,
            hot_probability: 1.0,
        },
        1,
    );
    assert_eq!(workload.hot_set_size(), 5);
    for (node, index) in workload.take(200) {
        assert!(node.index() < 3);
        assert!(index < 5);
    }
}

#[test]
fn test_step_matches_stats() {
    let mut sim = Simulator::new(&small_config()).unwrap();
    let mut total = 0;
    for _ in 0..20 {
        total += sim.step().unwrap().cost();
    }
    assert_eq!(sim.stats().requests, 20);
    assert_eq!(sim.stats().total_cost, total);
}

#[test]
fn test_extreme_disk_cost_runs_to_completion() {
    let mut config = small_config();
    config.coordinator.cache_size = 0;
    config.coordinator.disk_to_cache_cost = u64::MAX;
    config.workload.requests = 50;
    assert!(config.validate().is_ok());

    let mut sim = Simulator::new(&config).unwrap();
    let stats = sim.run().unwrap().clone();

    assert_eq!(stats.requests, 50);
    assert!(stats.misses > 0);
    assert_eq!(stats.total_cost, u64::MAX);
}
