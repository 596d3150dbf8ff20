//! Mock insertion policies.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coopcache_core::Block;
use coopcache_core::cache::policies::InsertPolicy;
use coopcache_core::cache::{AgingCache, Eviction};
use rand::RngCore;

/// Counts `accept_insert` calls and delegates to aging eviction.
pub struct RecordingPolicy {
    calls: Arc<AtomicUsize>,
}

impl RecordingPolicy {
    /// Returns the policy and a handle to its call counter.
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl InsertPolicy for RecordingPolicy {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn accept_insert(
        &mut self,
        cache: &mut AgingCache,
        block: Block,
        rng: &mut dyn RngCore,
    ) -> Eviction {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        cache.evict(block, rng)
    }
}

/// Reads a call counter.
pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
