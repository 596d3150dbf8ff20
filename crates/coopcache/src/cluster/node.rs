//! Client cache node.
//!
//! A node owns a private aging cache and an insertion policy. The request
//! path itself lives on [`Cluster`](super::Cluster), because a local miss
//! escalates to the coordinator, which may in turn probe other nodes.

use std::fmt;

use rand::RngCore;

use crate::cache::policies::{AgingEviction, InsertPolicy};
use crate::cache::{AgingCache, Eviction};
use crate::common::{Block, ClusterError, ContentId};

use super::accounting::Response;

/// A client in the cooperative cache.
pub struct CacheNode {
    id: u64,
    cache: AgingCache,
    cache_reference_cost: u64,
    network_hop_cost: u64,
    policy: Box<dyn InsertPolicy + Send + Sync>,
    response: Option<Response>,
}

impl CacheNode {
    /// Creates a node with the default aging-eviction policy.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier used in logs.
    /// * `cache_size` - Number of cache slots.
    /// * `cache_reference_cost` - Cost of one local cache reference.
    /// * `network_hop_cost` - Cost of sending a block or request over the network.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::ZeroCapacity`] when `cache_size` is zero.
    pub fn new(
        id: u64,
        cache_size: usize,
        cache_reference_cost: u64,
        network_hop_cost: u64,
    ) -> Result<Self, ClusterError> {
        if cache_size == 0 {
            return Err(ClusterError::ZeroCapacity {
                what: "client cache",
            });
        }
        Ok(Self {
            id,
            cache: AgingCache::new(cache_size),
            cache_reference_cost,
            network_hop_cost,
            policy: Box::new(AgingEviction::new()),
            response: None,
        })
    }

    /// Replaces the insertion policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn InsertPolicy + Send + Sync>) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the node identifier.
    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the node's cache.
    #[inline]
    pub const fn cache(&self) -> &AgingCache {
        &self.cache
    }

    /// Returns the node's cache mutably.
    #[inline]
    pub fn cache_mut(&mut self) -> &mut AgingCache {
        &mut self.cache
    }

    /// Cost of one local cache reference.
    #[inline]
    pub const fn cache_reference_cost(&self) -> u64 {
        self.cache_reference_cost
    }

    /// Cost of one network hop out of this node.
    #[inline]
    pub const fn network_hop_cost(&self) -> u64 {
        self.network_hop_cost
    }

    /// Name of the active insertion policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Loads the initial cache contents and draws the aging counters.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::WarmUpOverflow`] if `blocks` does not fit.
    pub fn warm_up(&mut self, blocks: &[Block], rng: &mut dyn RngCore) -> Result<(), ClusterError> {
        self.cache.warm_up(blocks, rng)
    }

    /// Finds the local slot holding `id`.
    #[inline]
    pub fn lookup_local(&self, id: ContentId) -> Option<usize> {
        self.cache.lookup(id)
    }

    /// Ages the local cache after one reference attempt.
    #[inline]
    pub fn age(&mut self, referenced: Option<usize>) {
        self.cache.age(referenced);
    }

    /// Hands a freshly fetched block to the insertion policy.
    pub fn accept_insert(&mut self, block: Block, rng: &mut dyn RngCore) -> Eviction {
        self.policy.accept_insert(&mut self.cache, block, rng)
    }

    /// Identities currently cached, in slot order.
    pub fn content_ids(&self) -> impl Iterator<Item = ContentId> + '_ {
        self.cache.blocks().map(Block::id)
    }

    /// The response to this node's most recent request.
    #[inline]
    pub const fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub(crate) fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    pub(crate) fn clear_response(&mut self) {
        self.response = None;
    }
}

impl fmt::Debug for CacheNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheNode")
            .field("id", &self.id)
            .field("cache", &self.cache)
            .field("cache_reference_cost", &self.cache_reference_cost)
            .field("network_hop_cost", &self.network_hop_cost)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}
