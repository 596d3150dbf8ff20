//! Insertion Policies.
//!
//! A policy decides what a client does with a block fetched from the
//! coordinator's disk. Policy variants plug in here without touching the
//! resolution protocol.
//!
//! # Policies
//!
//! - `AgingEviction`: Replace the coldest slot by aging counter (default).
//! - `Bypass`: Never cache fetched blocks locally.

/// Aging-counter eviction (default).
pub mod aging;

/// No local caching of fetched blocks.
pub mod bypass;

pub use aging::AgingEviction;
pub use bypass::BypassPolicy;

use rand::RngCore;

use super::{AgingCache, Eviction};
use crate::common::Block;

/// Trait for client insertion policies.
///
/// Called once per disk fetch, after the response has been delivered to the
/// requester.
pub trait InsertPolicy: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Decides whether and where `block` enters `cache`.
    ///
    /// # Arguments
    ///
    /// * `cache` - The requesting node's own cache.
    /// * `block` - The block just fetched from disk.
    /// * `rng` - Source for any counter draws.
    fn accept_insert(
        &mut self,
        cache: &mut AgingCache,
        block: Block,
        rng: &mut dyn RngCore,
    ) -> Eviction;
}
