//! Cooperative caching simulator library.
//!
//! This crate simulates a set of client caches backed by a shared
//! coordinator, where a client's miss may be served by a peer's cache before
//! falling back to the coordinator's cache or disk. It provides:
//! 1. **Cluster:** The request-resolution protocol and its cost accounting.
//! 2. **Cache:** Aging-counter caches and pluggable insertion policies.
//! 3. **Storage:** Slot arrays and the authoritative disk.
//! 4. **Simulation:** Configuration, workload generation, and statistics.
//!
//! Cost is a pure additive integer model, not wall-clock time.
//!
//! ```
//! use coopcache_core::{Block, CacheNode, Cluster, Coordinator, NodeId, ServedBy};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut cluster = Cluster::new(Coordinator::new(0, 2, 4, 1, 3, 1).unwrap());
//! cluster.register_clients(vec![
//!     CacheNode::new(1, 2, 1, 1).unwrap(),
//!     CacheNode::new(2, 2, 1, 1).unwrap(),
//! ]);
//! let blocks: Vec<Block> = ["x", "y", "z", "w"].into_iter().map(Block::from).collect();
//! cluster.load_disk(blocks.iter().cloned()).unwrap();
//! cluster.warm_up_node(NodeId(0), &blocks[0..2], &mut rng).unwrap();
//! cluster.warm_up_node(NodeId(1), &blocks[2..4], &mut rng).unwrap();
//! cluster.warm_up_coordinator(&[], &mut rng).unwrap();
//! cluster.refresh_all_summaries().unwrap();
//!
//! let response = cluster.request(NodeId(0), blocks[2].id(), &mut rng).unwrap();
//! assert_eq!(response.block.data(), "z");
//! assert_eq!(response.cost(), 5);
//! assert_eq!(response.served_by, ServedBy::Peer(NodeId(1)));
//! ```

/// Aging-counter cache and insertion policies.
pub mod cache;
/// Coordinator, client nodes, summaries and request routing.
pub mod cluster;
/// Common types (identifiers, blocks, constants, errors).
pub mod common;
/// Simulation configuration (defaults, hierarchical config structures).
pub mod config;
/// Workload generation and the top-level simulator.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Slot arrays and disk storage.
pub mod storage;

/// Client node type; construct with `CacheNode::new`.
pub use crate::cluster::CacheNode;
/// Coordinator plus roster; owns every hop of a request.
pub use crate::cluster::Cluster;
/// Shared server; construct with `Coordinator::new`.
pub use crate::cluster::Coordinator;
/// Per-request outcome types.
pub use crate::cluster::{RequestRecord, Response, ServedBy};
/// Data unit and identifiers.
pub use crate::common::{Block, CacheSite, ClusterError, ContentId, NodeId};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
