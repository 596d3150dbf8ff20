//! Common types used throughout the cooperative caching simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Identifiers:** Strong types for content identities and roster indices.
//! 2. **Blocks:** The immutable data unit stored in caches and on disk.
//! 3. **Constants:** Aging-counter bounds and report formatting.
//! 4. **Error Handling:** The crate-wide error enum.

/// Data unit definition.
pub mod block;

/// Simulation-wide constants.
pub mod constants;

/// Error types.
pub mod error;

/// Content and node identifier types.
pub mod ids;

pub use block::Block;
pub use constants::{AGING_MAX, AGING_MIN};
pub use error::ClusterError;
pub use ids::{CacheSite, ContentId, NodeId};
