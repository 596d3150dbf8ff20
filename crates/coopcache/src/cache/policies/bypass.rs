//! Bypass Policy.
//!
//! Fetched blocks are handed to the requester but never cached locally.
//! Useful as a baseline: the client caches keep their warm-up contents for
//! the whole run.

use rand::RngCore;

use super::InsertPolicy;
use crate::cache::{AgingCache, Eviction};
use crate::common::Block;

/// Bypass policy state.
#[derive(Clone, Copy, Debug, Default)]
pub struct BypassPolicy;

impl BypassPolicy {
    /// Creates the policy.
    pub const fn new() -> Self {
        Self
    }
}

impl InsertPolicy for BypassPolicy {
    fn name(&self) -> &'static str {
        "bypass"
    }

    fn accept_insert(
        &mut self,
        _cache: &mut AgingCache,
        _block: Block,
        _rng: &mut dyn RngCore,
    ) -> Eviction {
        Eviction::Dropped
    }
}
