//! Cooperative Cache Cluster.
//!
//! This module implements the request-resolution protocol. It provides:
//! 1. **Nodes:** Client caches answering their own and forwarded requests.
//! 2. **Coordinator:** The shared cache, the disk, and per-client content summaries.
//! 3. **Routing:** Local cache → peer cache (by summary) → coordinator cache → disk.
//! 4. **Accounting:** A by-value request record threaded through every hop.
//!
//! A request is resolved start to finish before the next one begins. Every
//! hop is a synchronous call on `&mut Cluster`, so a node's cache, its aging
//! counters and the coordinator's summaries only ever have one writer.

/// Per-request cost and hit/miss accounting.
pub mod accounting;

/// Construction from configuration.
pub mod builder;

/// Coordinator state.
pub mod coordinator;

/// Client node state.
pub mod node;

/// Coordinator-side content summaries.
pub mod summary;

pub use self::accounting::{Probe, RequestRecord, Response, ServedBy};
pub use self::coordinator::Coordinator;
pub use self::node::CacheNode;
pub use self::summary::ContentSummary;

use rand::RngCore;
use tracing::{debug, trace};

use crate::common::{Block, CacheSite, ClusterError, ContentId, NodeId};

/// A coordinator together with the roster of client nodes it routes between.
#[derive(Debug)]
pub struct Cluster {
    coordinator: Coordinator,
    nodes: Vec<CacheNode>,
    stale_probes: u64,
}

impl Cluster {
    /// Creates a cluster around `coordinator` with no registered clients.
    pub const fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            nodes: Vec::new(),
            stale_probes: 0,
        }
    }

    /// Records the client roster and gives each client an empty summary.
    ///
    /// Roster order is the order peers are probed in. Node `i` is addressed
    /// as `NodeId(i)`.
    pub fn register_clients(&mut self, nodes: Vec<CacheNode>) {
        self.coordinator.register(nodes.len());
        self.nodes = nodes;
    }

    /// Returns the coordinator.
    #[inline]
    pub const fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Returns the coordinator mutably.
    #[inline]
    pub fn coordinator_mut(&mut self) -> &mut Coordinator {
        &mut self.coordinator
    }

    /// Returns the registered clients in roster order.
    #[inline]
    pub fn nodes(&self) -> &[CacheNode] {
        &self.nodes
    }

    /// Number of registered clients.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no clients are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the client at `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::UnknownNode`] for an index outside the roster.
    pub fn node(&self, node: NodeId) -> Result<&CacheNode, ClusterError> {
        self.nodes
            .get(node.index())
            .ok_or(ClusterError::UnknownNode(node))
    }

    /// Returns the client at `node` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::UnknownNode`] for an index outside the roster.
    pub fn node_mut(&mut self, node: NodeId) -> Result<&mut CacheNode, ClusterError> {
        self.nodes
            .get_mut(node.index())
            .ok_or(ClusterError::UnknownNode(node))
    }

    /// Number of coordinator probes that found a stale summary entry.
    #[inline]
    pub const fn stale_probes(&self) -> u64 {
        self.stale_probes
    }

    /// Warms up the cache of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::UnknownNode`] or [`ClusterError::WarmUpOverflow`].
    pub fn warm_up_node(
        &mut self,
        node: NodeId,
        blocks: &[Block],
        rng: &mut dyn RngCore,
    ) -> Result<(), ClusterError> {
        self.node_mut(node)?.warm_up(blocks, rng)
    }

    /// Warms up the coordinator cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::WarmUpOverflow`] if `blocks` does not fit.
    pub fn warm_up_coordinator(
        &mut self,
        blocks: &[Block],
        rng: &mut dyn RngCore,
    ) -> Result<(), ClusterError> {
        self.coordinator.warm_up(blocks, rng)
    }

    /// Stores `blocks` on the coordinator's disk.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::DiskFull`] if the catalogue exceeds the disk.
    pub fn load_disk(&mut self, blocks: impl IntoIterator<Item = Block>) -> Result<(), ClusterError> {
        self.coordinator.load_disk(blocks)
    }

    /// Resynchronizes the coordinator's summary of `node` with its cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::ClientsNotRegistered`] before registration and
    /// [`ClusterError::UnknownNode`] for an index outside the roster.
    pub fn refresh_summary(&mut self, node: NodeId) -> Result<(), ClusterError> {
        if !self.coordinator.is_registered() {
            return Err(ClusterError::ClientsNotRegistered);
        }
        let client = self
            .nodes
            .get(node.index())
            .ok_or(ClusterError::UnknownNode(node))?;
        let summary = self
            .coordinator
            .summary_mut(node)
            .ok_or(ClusterError::UnknownNode(node))?;
        summary.refresh(client.content_ids());
        debug!(%node, entries = summary.len(), "summary refreshed");
        Ok(())
    }

    /// Refreshes every client's summary.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::ClientsNotRegistered`] before registration.
    pub fn refresh_all_summaries(&mut self) -> Result<(), ClusterError> {
        for i in 0..self.nodes.len() {
            self.refresh_summary(NodeId(i))?;
        }
        Ok(())
    }

    /// Issues a fresh request from `requester` for `identity`.
    ///
    /// The response is returned and also stored as the requester's
    /// [`CacheNode::response`].
    ///
    /// # Errors
    ///
    /// Fails fast on contract violations: unregistered roster, unknown
    /// requester, or content absent from disk. Every client and the
    /// coordinator must have been warmed up, whether or not this request
    /// would reach them.
    pub fn request(
        &mut self,
        requester: NodeId,
        identity: ContentId,
        rng: &mut dyn RngCore,
    ) -> Result<Response, ClusterError> {
        if !self.coordinator.is_registered() {
            return Err(ClusterError::ClientsNotRegistered);
        }
        let _ = self.node(requester)?;
        self.ensure_warm()?;
        self.node_mut(requester)?.clear_response();
        let _ = self.resolve(
            requester,
            RequestRecord::new(),
            None,
            identity,
            Probe::Requester,
            rng,
        )?;
        self.node(requester)?
            .response()
            .cloned()
            .ok_or(ClusterError::BlockNotOnDisk(identity))
    }

    /// Resolves `identity` at `node`.
    ///
    /// With `requester` unset the node is its own requester. A node probed by
    /// the coordinator never escalates: on a miss it asks the coordinator to
    /// refresh its summary and returns `false`.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn resolve(
        &mut self,
        node: NodeId,
        mut record: RequestRecord,
        requester: Option<NodeId>,
        identity: ContentId,
        probe: Probe,
        rng: &mut dyn RngCore,
    ) -> Result<bool, ClusterError> {
        let requester = requester.unwrap_or(node);
        let (found, client, reference_cost, hop_cost) = {
            let target = self.node_mut(node)?;
            if !target.cache().is_warm() {
                return Err(ClusterError::NotWarmedUp {
                    node: CacheSite::Node(node),
                });
            }
            let found = target
                .cache()
                .find(identity)
                .map(|(slot, block)| (slot, block.clone()));
            target.age(found.as_ref().map(|(slot, _)| *slot));
            (
                found.map(|(_, block)| block),
                target.id(),
                target.cache_reference_cost(),
                target.network_hop_cost(),
            )
        };
        record.cost = record.cost.saturating_add(reference_cost);

        if let Some(block) = found {
            record.cost = record.cost.saturating_add(hop_cost);
            let served_by = if requester == node {
                record.local_hits += 1;
                ServedBy::Local
            } else {
                record.global_hits += 1;
                ServedBy::Peer(node)
            };
            trace!(%node, client, %requester, block = %identity, cost = record.cost, "cache hit");
            self.deliver(requester, block, record, served_by)?;
            return Ok(true);
        }

        match probe {
            Probe::Coordinator => {
                trace!(%node, client, block = %identity, "stale summary entry");
                self.stale_probes += 1;
                self.refresh_summary(node)?;
                Ok(false)
            }
            Probe::Requester => {
                trace!(%node, client, block = %identity, "local miss, asking coordinator");
                record.cost = record.cost.saturating_add(hop_cost);
                self.resolve_cluster(record, requester, identity, rng)
            }
        }
    }

    /// Resolves a requester's miss across the cluster.
    ///
    /// Peers whose summary claims `identity` are probed in roster order and
    /// the first one that answers wins. Otherwise the coordinator cache is
    /// tried, then disk; a disk read is handed to the requester's insertion
    /// policy after delivery.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub fn resolve_cluster(
        &mut self,
        mut record: RequestRecord,
        requester: NodeId,
        identity: ContentId,
        rng: &mut dyn RngCore,
    ) -> Result<bool, ClusterError> {
        if !self.coordinator.is_registered() {
            return Err(ClusterError::ClientsNotRegistered);
        }
        if !self.coordinator.cache().is_warm() {
            return Err(ClusterError::NotWarmedUp {
                node: CacheSite::Coordinator,
            });
        }
        let coordinator = self.coordinator.id();
        let hop_cost = self.coordinator.network_hop_cost();

        for i in 0..self.nodes.len() {
            let peer = NodeId(i);
            if peer == requester || !self.coordinator.summary_contains(peer, identity) {
                continue;
            }
            record.cost = record.cost.saturating_add(hop_cost);
            trace!(%peer, coordinator, %requester, block = %identity, "probing peer");
            if self.resolve(peer, record, Some(requester), identity, Probe::Coordinator, rng)? {
                return Ok(true);
            }
        }

        record.cost = record
            .cost
            .saturating_add(self.coordinator.cache_reference_cost());
        if let Some(block) = self.coordinator.cache_hit(identity) {
            record.cost = record.cost.saturating_add(hop_cost);
            record.global_hits += 1;
            trace!(coordinator, %requester, block = %identity, cost = record.cost, "coordinator cache hit");
            self.deliver(requester, block, record, ServedBy::Coordinator)?;
            return Ok(true);
        }

        record.misses += 1;
        record.cost = record
            .cost
            .saturating_add(self.coordinator.disk_to_cache_cost());
        let block = self
            .coordinator
            .read_disk(identity)
            .ok_or(ClusterError::BlockNotOnDisk(identity))?;
        trace!(coordinator, %requester, block = %identity, cost = record.cost, "disk read");
        self.deliver(requester, block.clone(), record, ServedBy::Disk)?;
        if self.coordinator.promotes_disk_reads() {
            let _ = self.coordinator.evict(block.clone(), rng);
        }
        let _ = self.node_mut(requester)?.accept_insert(block, rng);
        Ok(true)
    }

    /// Checks that every client and the coordinator have been warmed up.
    fn ensure_warm(&self) -> Result<(), ClusterError> {
        if let Some(i) = self.nodes.iter().position(|n| !n.cache().is_warm()) {
            return Err(ClusterError::NotWarmedUp {
                node: CacheSite::Node(NodeId(i)),
            });
        }
        if !self.coordinator.cache().is_warm() {
            return Err(ClusterError::NotWarmedUp {
                node: CacheSite::Coordinator,
            });
        }
        Ok(())
    }

    fn deliver(
        &mut self,
        requester: NodeId,
        block: Block,
        record: RequestRecord,
        served_by: ServedBy,
    ) -> Result<(), ClusterError> {
        self.node_mut(requester)?.set_response(Response {
            block,
            record,
            served_by,
        });
        Ok(())
    }
}
