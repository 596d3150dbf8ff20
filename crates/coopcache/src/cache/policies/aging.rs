//! Aging-Counter Eviction Policy.
//!
//! Replaces the slot with the lowest aging counter (lowest index on ties) and
//! gives the new block a fresh random counter. If every slot is saturated at
//! `AGING_MAX`, the block is not cached.

use rand::RngCore;

use super::InsertPolicy;
use crate::cache::{AgingCache, Eviction};
use crate::common::Block;

/// Aging eviction policy state.
#[derive(Clone, Copy, Debug, Default)]
pub struct AgingEviction;

impl AgingEviction {
    /// Creates the policy.
    pub const fn new() -> Self {
        Self
    }
}

impl InsertPolicy for AgingEviction {
    fn name(&self) -> &'static str {
        "aging"
    }

    /// Delegates to [`AgingCache::evict`].
    fn accept_insert(
        &mut self,
        cache: &mut AgingCache,
        block: Block,
        rng: &mut dyn RngCore,
    ) -> Eviction {
        cache.evict(block, rng)
    }
}
