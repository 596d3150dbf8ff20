//! Simulator: owns the cluster and the request stream side by side.
//!
//! Setup follows a fixed layout so runs are reproducible from the seed:
//! the disk holds `block-0 .. block-{disk_size - 1}`, client `i` is warmed
//! with the `i`-th contiguous window of the catalogue, the coordinator with
//! the catalogue's tail, and every summary is refreshed once before the
//! first request.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::cluster::{Cluster, Response};
use crate::common::{Block, ClusterError, NodeId};
use crate::config::Config;
use crate::stats::SimStats;

use super::workload::Workload;

/// Top-level simulator: cluster state + workload + statistics.
#[derive(Debug)]
pub struct Simulator {
    /// The simulated cluster.
    pub cluster: Cluster,
    catalogue: Vec<Block>,
    workload: Workload,
    rng: StdRng,
    requests: usize,
    stats: SimStats,
}

impl Simulator {
    /// Builds, loads and warms up a cluster for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidConfig`] if validation fails.
    pub fn new(config: &Config) -> Result<Self, ClusterError> {
        let mut cluster = Cluster::from_config(config)?;
        let seed = config.workload.seed;
        let mut rng = StdRng::seed_from_u64(seed);

        let catalogue: Vec<Block> = (0..config.coordinator.disk_size)
            .map(|i| Block::new(format!("block-{i}")))
            .collect();
        cluster.load_disk(catalogue.iter().cloned())?;

        let window = config.client.cache_size;
        for (i, blocks) in catalogue
            .chunks(window)
            .take(config.client.count)
            .enumerate()
        {
            cluster.warm_up_node(NodeId(i), blocks, &mut rng)?;
        }
        let tail = catalogue.len() - config.coordinator.cache_size;
        cluster.warm_up_coordinator(&catalogue[tail..], &mut rng)?;
        cluster.refresh_all_summaries()?;

        let workload = Workload::new(
            config.client.count,
            catalogue.len(),
            config.workload.distribution,
            seed.wrapping_add(1),
        );
        let mut stats = SimStats::default();
        stats.summary_refreshes = cluster.coordinator().summary_refreshes();

        info!(
            clients = config.client.count,
            disk = catalogue.len(),
            requests = config.workload.requests,
            seed,
            "simulator ready"
        );
        Ok(Self {
            cluster,
            catalogue,
            workload,
            rng,
            requests: config.workload.requests,
            stats,
        })
    }

    /// The blocks stored on disk, in catalogue order.
    #[inline]
    pub fn catalogue(&self) -> &[Block] {
        &self.catalogue
    }

    /// Statistics gathered so far.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Issues the next request from the workload.
    ///
    /// # Errors
    ///
    /// Propagates any contract violation raised by the cluster.
    pub fn step(&mut self) -> Result<Response, ClusterError> {
        let (requester, index) = self.workload.next_request();
        let identity = self.catalogue[index].id();
        let response = self.cluster.request(requester, identity, &mut self.rng)?;
        self.stats.record(&response);
        self.stats.stale_probes = self.cluster.stale_probes();
        self.stats.summary_refreshes = self.cluster.coordinator().summary_refreshes();
        Ok(response)
    }

    /// Runs the configured number of requests.
    ///
    /// # Errors
    ///
    /// Stops at the first contract violation raised by the cluster.
    pub fn run(&mut self) -> Result<&SimStats, ClusterError> {
        for _ in 0..self.requests {
            let _ = self.step()?;
        }
        info!(
            requests = self.stats.requests,
            avg_cost = self.stats.average_cost(),
            "run finished"
        );
        Ok(&self.stats)
    }
}
