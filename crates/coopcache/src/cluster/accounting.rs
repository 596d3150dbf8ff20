//! Per-request accounting.
//!
//! A [`RequestRecord`] is created when a request starts and is passed by
//! value through every hop, so a hop that fails hands back nothing: whatever
//! it added to its own copy is discarded along with it.

use crate::common::{Block, NodeId};

/// Cost and hit/miss counters accumulated by one in-flight request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestRecord {
    /// Accumulated cost in cost units, saturating at `u64::MAX`.
    pub cost: u64,
    /// Hits in the requester's own cache.
    pub local_hits: u32,
    /// Hits served on the requester's behalf by a peer or the coordinator cache.
    pub global_hits: u32,
    /// Requests that had to go to disk.
    pub misses: u32,
}

impl RequestRecord {
    /// Creates an empty record.
    pub const fn new() -> Self {
        Self {
            cost: 0,
            local_hits: 0,
            global_hits: 0,
            misses: 0,
        }
    }
}

/// Where a request was finally answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServedBy {
    /// The requester's own cache.
    Local,
    /// A peer's cache, reached through its content summary.
    Peer(NodeId),
    /// The coordinator's cache.
    Coordinator,
    /// The coordinator's disk.
    Disk,
}

/// How a node was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The node is handling its own request.
    Requester,
    /// The coordinator is probing the node on behalf of another requester.
    Coordinator,
}

/// Result stored at the requester once a block is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// The block that was found.
    pub block: Block,
    /// Final accounting for the request.
    pub record: RequestRecord,
    /// Tier that answered.
    pub served_by: ServedBy,
}

impl Response {
    /// Total cost of the request.
    #[inline]
    pub const fn cost(&self) -> u64 {
        self.record.cost
    }

    /// Local-hit count of the request.
    #[inline]
    pub const fn local_hits(&self) -> u32 {
        self.record.local_hits
    }

    /// Global-hit count of the request.
    #[inline]
    pub const fn global_hits(&self) -> u32 {
        self.record.global_hits
    }

    /// Miss count of the request.
    #[inline]
    pub const fn misses(&self) -> u32 {
        self.record.misses
    }
}
