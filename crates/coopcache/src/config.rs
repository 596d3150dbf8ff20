//! Configuration system for the cooperative caching simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline capacities and cost units.
//! 2. **Structures:** Hierarchical config for the coordinator, the clients and the workload.
//! 3. **Enums:** Client insertion policy and workload distribution.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`,
//! `Config::from_json_file`) or built with `Config::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ClusterError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Coordinator cache slots.
    pub const COORDINATOR_CACHE_SIZE: usize = 64;

    /// Blocks on the coordinator's disk. Also the size of the request catalogue.
    pub const DISK_SIZE: usize = 1024;

    /// Cost of one cache reference, at a client or at the coordinator.
    pub const CACHE_REFERENCE_COST: u64 = 1;

    /// Cost of reading one block from disk.
    pub const DISK_TO_CACHE_COST: u64 = 100;

    /// Cost of one network hop.
    pub const NETWORK_HOP_COST: u64 = 10;

    /// Number of client nodes.
    pub const CLIENT_COUNT: usize = 8;

    /// Client cache slots.
    pub const CLIENT_CACHE_SIZE: usize = 16;

    /// Requests issued per run.
    pub const REQUESTS: usize = 10_000;

    /// Seed for every random draw in a run.
    pub const SEED: u64 = 0x5EED;

    /// Share of the catalogue forming the hot set.
    pub const HOT_FRACTION: f64 = 0.1;

    /// Probability a request targets the hot set.
    pub const HOT_PROBABILITY: f64 = 0.9;
}

/// Client insertion policy.
///
/// Decides what a client does with a block it fetched from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum InsertPolicyKind {
    /// Replace the coldest slot by aging counter.
    #[default]
    Aging,
    /// Never cache fetched blocks locally.
    Bypass,
}

/// Distribution of requested blocks over the disk catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "PascalCase")]
pub enum Distribution {
    /// Every block is equally likely.
    #[default]
    Uniform,
    /// A small hot set receives most requests.
    HotSet {
        /// Share of the catalogue (from the front) forming the hot set.
        #[serde(default = "Distribution::default_hot_fraction")]
        hot_fraction: f64,
        /// Probability a request targets the hot set.
        #[serde(default = "Distribution::default_hot_probability")]
        hot_probability: f64,
    },
}

impl Distribution {
    /// Returns the default hot-set fraction.
    fn default_hot_fraction() -> f64 {
        defaults::HOT_FRACTION
    }

    /// Returns the default hot-set probability.
    fn default_hot_probability() -> f64 {
        defaults::HOT_PROBABILITY
    }
}

/// Root configuration structure containing all simulation settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use coopcache_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.client.count, 8);
/// assert_eq!(config.coordinator.disk_size, 1024);
/// ```
///
/// Deserializing from JSON; omitted fields take their defaults:
///
/// ```
/// use coopcache_core::config::{Config, Distribution, InsertPolicyKind};
///
/// let json = r#"{
///     "coordinator": { "cache_size": 2, "disk_size": 4, "disk_to_cache_cost": 3, "network_hop_cost": 1 },
///     "client": { "count": 2, "cache_size": 2, "network_hop_cost": 1, "policy": "Bypass" },
///     "workload": { "requests": 50, "distribution": { "kind": "HotSet", "hot_fraction": 0.25 } }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.coordinator.cache_reference_cost, 1);
/// assert_eq!(config.client.policy, InsertPolicyKind::Bypass);
/// assert!(matches!(config.workload.distribution, Distribution::HotSet { .. }));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Coordinator cache, disk and costs
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
    /// Client roster size, caches and costs
    #[serde(default)]
    pub client: ClientConfig,
    /// Request stream
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Json`] on malformed input and
    /// [`ClusterError::InvalidConfig`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ClusterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClusterError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks the configuration for contract violations.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ClusterError> {
        let invalid =
            |msg: String| -> Result<(), ClusterError> { Err(ClusterError::InvalidConfig(msg)) };

        if self.coordinator.disk_size == 0 {
            return invalid("coordinator.disk_size must be non-zero".to_owned());
        }
        if self.client.count == 0 {
            return invalid("client.count must be non-zero".to_owned());
        }
        if self.client.cache_size == 0 {
            return invalid("client.cache_size must be non-zero".to_owned());
        }
        let footprint = self.client.count * self.client.cache_size;
        if footprint > self.coordinator.disk_size {
            return invalid(format!(
                "clients cache {footprint} blocks but the disk only holds {}",
                self.coordinator.disk_size
            ));
        }
        if self.coordinator.cache_size > self.coordinator.disk_size {
            return invalid(format!(
                "coordinator.cache_size {} exceeds disk_size {}",
                self.coordinator.cache_size, self.coordinator.disk_size
            ));
        }
        if let Distribution::HotSet {
            hot_fraction,
            hot_probability,
        } = self.workload.distribution
        {
            if !(hot_fraction > 0.0 && hot_fraction <= 1.0) {
                return invalid(format!("hot_fraction {hot_fraction} is outside (0, 1]"));
            }
            if !(0.0..=1.0).contains(&hot_probability) {
                return invalid(format!(
                    "hot_probability {hot_probability} is outside [0, 1]"
                ));
            }
        }
        Ok(())
    }
}

/// Coordinator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Coordinator cache slots (may be zero)
    #[serde(default = "CoordinatorConfig::default_cache_size")]
    pub cache_size: usize,

    /// Disk capacity in blocks; the workload catalogue fills it completely
    #[serde(default = "CoordinatorConfig::default_disk_size")]
    pub disk_size: usize,

    /// Cost of a coordinator cache reference
    #[serde(default = "default_cache_reference_cost")]
    pub cache_reference_cost: u64,

    /// Cost of a disk read
    #[serde(default = "CoordinatorConfig::default_disk_to_cache_cost")]
    pub disk_to_cache_cost: u64,

    /// Cost of one hop out of the coordinator
    #[serde(default = "default_network_hop_cost")]
    pub network_hop_cost: u64,

    /// Also cache disk reads in the coordinator cache
    #[serde(default)]
    pub promote_disk_reads: bool,
}

impl CoordinatorConfig {
    /// Returns the default coordinator cache size.
    fn default_cache_size() -> usize {
        defaults::COORDINATOR_CACHE_SIZE
    }

    /// Returns the default disk size.
    fn default_disk_size() -> usize {
        defaults::DISK_SIZE
    }

    /// Returns the default disk read cost.
    fn default_disk_to_cache_cost() -> u64 {
        defaults::DISK_TO_CACHE_COST
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            cache_size: defaults::COORDINATOR_CACHE_SIZE,
            disk_size: defaults::DISK_SIZE,
            cache_reference_cost: defaults::CACHE_REFERENCE_COST,
            disk_to_cache_cost: defaults::DISK_TO_CACHE_COST,
            network_hop_cost: defaults::NETWORK_HOP_COST,
            promote_disk_reads: false,
        }
    }
}

/// Client roster settings. Every client is configured identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Number of clients
    #[serde(default = "ClientConfig::default_count")]
    pub count: usize,

    /// Cache slots per client
    #[serde(default = "ClientConfig::default_cache_size")]
    pub cache_size: usize,

    /// Cost of a local cache reference
    #[serde(default = "default_cache_reference_cost")]
    pub cache_reference_cost: u64,

    /// Cost of one hop out of a client
    #[serde(default = "default_network_hop_cost")]
    pub network_hop_cost: u64,

    /// Insertion policy for disk reads
    #[serde(default)]
    pub policy: InsertPolicyKind,
}

impl ClientConfig {
    /// Returns the default number of clients.
    fn default_count() -> usize {
        defaults::CLIENT_COUNT
    }

    /// Returns the default client cache size.
    fn default_cache_size() -> usize {
        defaults::CLIENT_CACHE_SIZE
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            count: defaults::CLIENT_COUNT,
            cache_size: defaults::CLIENT_CACHE_SIZE,
            cache_reference_cost: defaults::CACHE_REFERENCE_COST,
            network_hop_cost: defaults::NETWORK_HOP_COST,
            policy: InsertPolicyKind::default(),
        }
    }
}

/// Request stream settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of requests to issue
    #[serde(default = "WorkloadConfig::default_requests")]
    pub requests: usize,

    /// Seed for warm-up, eviction and request draws
    #[serde(default = "WorkloadConfig::default_seed")]
    pub seed: u64,

    /// Which blocks get requested
    #[serde(default)]
    pub distribution: Distribution,
}

impl WorkloadConfig {
    /// Returns the default request count.
    fn default_requests() -> usize {
        defaults::REQUESTS
    }

    /// Returns the default seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            requests: defaults::REQUESTS,
            seed: defaults::SEED,
            distribution: Distribution::default(),
        }
    }
}

/// Shared default for both tiers' cache reference cost.
fn default_cache_reference_cost() -> u64 {
    defaults::CACHE_REFERENCE_COST
}

/// Shared default for both tiers' network hop cost.
fn default_network_hop_cost() -> u64 {
    defaults::NETWORK_HOP_COST
}
