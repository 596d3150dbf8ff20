//! Cluster error definitions.
//!
//! The resolution protocol itself has no recoverable failures: disk is
//! authoritative, and a peer that misses on a coordinator probe answers with
//! a control signal rather than an error. Everything here is a contract
//! violation by the caller (building or driving the cluster incorrectly) or a
//! configuration problem, reported eagerly instead of silently misbehaving.

use thiserror::Error;

use super::ids::{CacheSite, ContentId, NodeId};

/// Errors raised while building, configuring or driving a cluster.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A cache or disk was constructed with no capacity.
    #[error("{what} must have a non-zero capacity")]
    ZeroCapacity {
        /// Which store was empty (e.g. "client cache", "disk").
        what: &'static str,
    },

    /// A request was routed before `register_clients` was called.
    #[error("client roster has not been registered with the coordinator")]
    ClientsNotRegistered,

    /// A request reached a cache that was never warmed up.
    #[error("{node} has not been warmed up")]
    NotWarmedUp {
        /// The cold cache's owner.
        node: CacheSite,
    },

    /// Warm-up supplied more blocks than the cache can hold.
    #[error("warm-up supplied {supplied} blocks for a cache of {capacity} slots")]
    WarmUpOverflow {
        /// Number of blocks supplied.
        supplied: usize,
        /// Number of slots in the cache.
        capacity: usize,
    },

    /// The disk catalogue exceeds the disk capacity.
    #[error("disk is full ({capacity} blocks)")]
    DiskFull {
        /// Number of blocks the disk can hold.
        capacity: usize,
    },

    /// A roster index does not name a registered client.
    #[error("{0} is not in the client roster")]
    UnknownNode(NodeId),

    /// A request named content that exists nowhere in the cluster.
    #[error("block {0} is not on disk")]
    BlockNotOnDisk(ContentId),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a configuration document failed.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
