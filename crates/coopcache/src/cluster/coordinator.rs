//! Coordinator (server) state.
//!
//! The coordinator owns a cache, the authoritative disk and one content
//! summary per registered client. Routing across the roster lives on
//! [`Cluster`](super::Cluster), which owns both the coordinator and the
//! nodes it routes to.

use rand::RngCore;

use crate::cache::{AgingCache, Eviction};
use crate::common::{Block, ClusterError, ContentId, NodeId};
use crate::storage::Disk;

use super::summary::ContentSummary;

/// The shared server of the cooperative cache.
#[derive(Clone, Debug)]
pub struct Coordinator {
    id: u64,
    cache: AgingCache,
    disk: Disk,
    cache_reference_cost: u64,
    disk_to_cache_cost: u64,
    network_hop_cost: u64,
    summaries: Vec<ContentSummary>,
    registered: bool,
    promote_disk_reads: bool,
}

impl Coordinator {
    /// Creates a coordinator with an empty disk and a cold cache.
    ///
    /// A zero-size cache is allowed; every coordinator lookup then misses
    /// and requests fall through to disk.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier used in logs.
    /// * `cache_size` - Number of cache slots.
    /// * `disk_size` - Number of blocks the disk can hold.
    /// * `cache_reference_cost` - Cost of one coordinator cache reference.
    /// * `disk_to_cache_cost` - Cost of reading a block from disk.
    /// * `network_hop_cost` - Cost of one network hop out of the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::ZeroCapacity`] when `disk_size` is zero.
    pub fn new(
        id: u64,
        cache_size: usize,
        disk_size: usize,
        cache_reference_cost: u64,
        disk_to_cache_cost: u64,
        network_hop_cost: u64,
    ) -> Result<Self, ClusterError> {
        Ok(Self {
            id,
            cache: AgingCache::new(cache_size),
            disk: Disk::new(disk_size)?,
            cache_reference_cost,
            disk_to_cache_cost,
            network_hop_cost,
            summaries: Vec::new(),
            registered: false,
            promote_disk_reads: false,
        })
    }

    /// Also caches every disk read in the coordinator's own cache.
    ///
    /// Off by default: disk reads are only cached at the requester.
    #[must_use]
    pub fn with_disk_promotion(mut self, enabled: bool) -> Self {
        self.promote_disk_reads = enabled;
        self
    }

    /// Returns the coordinator identifier.
    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the coordinator's cache.
    #[inline]
    pub const fn cache(&self) -> &AgingCache {
        &self.cache
    }

    /// Returns the coordinator's cache mutably.
    #[inline]
    pub fn cache_mut(&mut self) -> &mut AgingCache {
        &mut self.cache
    }

    /// Returns the disk.
    #[inline]
    pub const fn disk(&self) -> &Disk {
        &self.disk
    }

    /// Cost of one coordinator cache reference.
    #[inline]
    pub const fn cache_reference_cost(&self) -> u64 {
        self.cache_reference_cost
    }

    /// Cost of reading one block from disk.
    #[inline]
    pub const fn disk_to_cache_cost(&self) -> u64 {
        self.disk_to_cache_cost
    }

    /// Cost of one network hop out of the coordinator.
    #[inline]
    pub const fn network_hop_cost(&self) -> u64 {
        self.network_hop_cost
    }

    /// Whether disk reads are promoted into the coordinator cache.
    #[inline]
    pub const fn promotes_disk_reads(&self) -> bool {
        self.promote_disk_reads
    }

    /// Returns `true` once a roster has been registered.
    #[inline]
    pub const fn is_registered(&self) -> bool {
        self.registered
    }

    /// Allocates one empty summary per client, discarding any previous roster.
    pub(crate) fn register(&mut self, clients: usize) {
        self.summaries = vec![ContentSummary::new(); clients];
        self.registered = true;
    }

    /// The summary held for `node`.
    pub fn summary(&self, node: NodeId) -> Option<&ContentSummary> {
        self.summaries.get(node.index())
    }

    pub(crate) fn summary_mut(&mut self, node: NodeId) -> Option<&mut ContentSummary> {
        self.summaries.get_mut(node.index())
    }

    /// Returns `true` if the summary for `node` claims `id`.
    pub fn summary_contains(&self, node: NodeId, id: ContentId) -> bool {
        self.summary(node).is_some_and(|summary| summary.contains(id))
    }

    /// Total refreshes across all summaries.
    pub fn summary_refreshes(&self) -> u64 {
        self.summaries.iter().map(ContentSummary::refreshes).sum()
    }

    /// Loads the initial cache contents and draws the aging counters.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::WarmUpOverflow`] if `blocks` does not fit.
    pub fn warm_up(&mut self, blocks: &[Block], rng: &mut dyn RngCore) -> Result<(), ClusterError> {
        self.cache.warm_up(blocks, rng)
    }

    /// Stores `blocks` on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::DiskFull`] if the catalogue exceeds the disk.
    pub fn load_disk(&mut self, blocks: impl IntoIterator<Item = Block>) -> Result<(), ClusterError> {
        for block in blocks {
            let _ = self.disk.store(block)?;
        }
        Ok(())
    }

    /// Looks `id` up in the coordinator cache and bumps its slot on a hit.
    ///
    /// Other slots are not decayed.
    pub fn cache_hit(&mut self, id: ContentId) -> Option<Block> {
        let (slot, block) = self.cache.find(id)?;
        let block = block.clone();
        self.cache.touch(slot);
        Some(block)
    }

    /// Reads `id` from disk.
    pub fn read_disk(&self, id: ContentId) -> Option<Block> {
        self.disk
            .lookup(id)
            .and_then(|slot| self.disk.get_block(slot))
            .cloned()
    }

    /// Inserts `block` into the coordinator cache by aging-counter eviction.
    pub fn evict(&mut self, block: Block, rng: &mut dyn RngCore) -> Eviction {
        self.cache.evict(block, rng)
    }
}
