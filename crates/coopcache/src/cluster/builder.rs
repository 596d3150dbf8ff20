//! Cluster construction from configuration.

use crate::cache::policies::{AgingEviction, BypassPolicy, InsertPolicy};
use crate::common::ClusterError;
use crate::config::{Config, InsertPolicyKind};

use super::{CacheNode, Cluster, Coordinator};

/// Identifier given to the coordinator; clients are numbered from 1.
pub const COORDINATOR_ID: u64 = 0;

/// Instantiates the insertion policy selected in configuration.
pub fn make_policy(kind: InsertPolicyKind) -> Box<dyn InsertPolicy + Send + Sync> {
    match kind {
        InsertPolicyKind::Aging => Box::new(AgingEviction::new()),
        InsertPolicyKind::Bypass => Box::new(BypassPolicy::new()),
    }
}

impl Cluster {
    /// Builds a cluster with its roster registered.
    ///
    /// Caches are left cold and the disk empty; warm-up is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidConfig`] if validation fails.
    pub fn from_config(config: &Config) -> Result<Self, ClusterError> {
        config.validate()?;
        let coord = &config.coordinator;
        let coordinator = Coordinator::new(
            COORDINATOR_ID,
            coord.cache_size,
            coord.disk_size,
            coord.cache_reference_cost,
            coord.disk_to_cache_cost,
            coord.network_hop_cost,
        )?
        .with_disk_promotion(coord.promote_disk_reads);

        let client = &config.client;
        let nodes = (0..client.count)
            .map(|i| {
                CacheNode::new(
                    i as u64 + 1,
                    client.cache_size,
                    client.cache_reference_cost,
                    client.network_hop_cost,
                )
                .map(|node| node.with_policy(make_policy(client.policy)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut cluster = Self::new(coordinator);
        cluster.register_clients(nodes);
        Ok(cluster)
    }
}
