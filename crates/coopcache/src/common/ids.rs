//! Strong identifier types.
//!
//! Content identities and roster indices are both plain integers underneath;
//! wrapping them keeps a slot index, a node index and a payload hash from
//! being mixed up at call sites.

use std::fmt;
use std::hash::Hasher;

use fnv::FnvHasher;

/// Content identity of a block: a deterministic FNV-1a hash of its payload.
///
/// Caches and content summaries compare blocks by this value only, so two
/// blocks with equal payloads are indistinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub u64);

impl ContentId {
    /// Computes the identity of a payload.
    pub fn of(payload: &str) -> Self {
        let mut hasher = FnvHasher::default();
        hasher.write(payload.as_bytes());
        Self(hasher.finish())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Position of a client node in the coordinator's roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the roster index as a `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A cache owner: one client node or the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheSite {
    /// The client at this roster position.
    Node(NodeId),
    /// The shared coordinator.
    Coordinator,
}

impl fmt::Display for CacheSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => node.fmt(f),
            Self::Coordinator => f.write_str("coordinator"),
        }
    }
}
