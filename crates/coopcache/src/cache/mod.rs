//! Aging-Counter Cache.
//!
//! This module implements the cache shared by every client node and the
//! coordinator. It pairs a fixed-capacity slot array with one aging counter
//! per slot, a decaying-recency approximation of LRU:
//! 1. **Warm-up:** Fills the slots and draws every counter from `[AGING_MIN, AGING_MAX]`.
//! 2. **Aging:** A reference bumps its own slot and decays every other slot.
//! 3. **Eviction:** Replaces the coldest slot unless every slot is saturated.

/// Insertion policies deciding what happens to a freshly fetched block.
pub mod policies;

use rand::{Rng, RngCore};
use tracing::debug;

use crate::common::{AGING_MAX, AGING_MIN, Block, ClusterError, ContentId};
use crate::storage::SlotArray;

/// Outcome of an insertion attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eviction {
    /// The block was written into `slot`, displacing `evicted` if the slot was occupied.
    Replaced {
        /// Slot that now holds the new block.
        slot: usize,
        /// Previous occupant of the slot.
        evicted: Option<Block>,
    },
    /// The block was not cached.
    Dropped,
}

/// Draws a fresh aging counter uniformly from `[AGING_MIN, AGING_MAX]`.
pub fn draw_counter(rng: &mut dyn RngCore) -> u8 {
    rng.random_range(AGING_MIN..=AGING_MAX)
}

/// Fixed-capacity cache with per-slot aging counters.
#[derive(Clone, Debug)]
pub struct AgingCache {
    slots: SlotArray,
    counters: Vec<u8>,
    warm: bool,
}

impl AgingCache {
    /// Creates a cold cache of `capacity` empty slots with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SlotArray::new(capacity),
            counters: vec![0; capacity],
            warm: false,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns `true` once [`warm_up`](Self::warm_up) has run.
    #[inline]
    pub const fn is_warm(&self) -> bool {
        self.warm
    }

    /// Loads the initial contents and draws every slot's counter.
    ///
    /// Counters are drawn for all slots, including slots left empty because
    /// fewer blocks than slots were supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::WarmUpOverflow`] if `blocks` does not fit.
    pub fn warm_up(&mut self, blocks: &[Block], rng: &mut dyn RngCore) -> Result<(), ClusterError> {
        self.slots.load(blocks)?;
        for counter in &mut self.counters {
            *counter = draw_counter(rng);
        }
        self.warm = true;
        Ok(())
    }

    /// Finds the slot holding `id`.
    #[inline]
    pub fn lookup(&self, id: ContentId) -> Option<usize> {
        self.slots.lookup(id)
    }

    /// Finds `id` and returns its slot together with the cached block.
    pub fn find(&self, id: ContentId) -> Option<(usize, &Block)> {
        let slot = self.slots.lookup(id)?;
        self.slots.get_block(slot).map(|block| (slot, block))
    }

    /// Returns the block held in `slot`.
    #[inline]
    pub fn get_block(&self, slot: usize) -> Option<&Block> {
        self.slots.get_block(slot)
    }

    /// Iterates over the cached blocks in slot order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.slots.blocks()
    }

    /// Returns the aging counters, one per slot.
    #[inline]
    pub fn counters(&self) -> &[u8] {
        &self.counters
    }

    /// Overrides the counter of `slot`, clamped to `AGING_MAX`.
    ///
    /// Out-of-range slots are ignored.
    pub fn set_counter(&mut self, slot: usize, value: u8) {
        if let Some(counter) = self.counters.get_mut(slot) {
            *counter = value.min(AGING_MAX);
        }
    }

    /// Ages the cache after one reference attempt.
    ///
    /// The referenced slot (if the reference hit) gains one, capped at
    /// `AGING_MAX`; every other non-zero counter loses one.
    pub fn age(&mut self, referenced: Option<usize>) {
        for (i, counter) in self.counters.iter_mut().enumerate() {
            if Some(i) == referenced {
                *counter = (*counter + 1).min(AGING_MAX);
            } else if *counter > 0 {
                *counter -= 1;
            }
        }
    }

    /// Bumps a slot's counter without decaying the others.
    pub fn touch(&mut self, slot: usize) {
        if let Some(counter) = self.counters.get_mut(slot) {
            *counter = (*counter + 1).min(AGING_MAX);
        }
    }

    /// Index of the slot with the lowest counter strictly below `AGING_MAX`.
    ///
    /// Ties go to the lowest index. `None` when every slot is saturated or
    /// the cache has no slots.
    pub fn victim(&self) -> Option<usize> {
        let mut min = AGING_MAX;
        let mut victim = None;
        for (i, &counter) in self.counters.iter().enumerate() {
            if counter < min {
                min = counter;
                victim = Some(i);
            }
        }
        victim
    }

    /// Inserts `block` over the coldest slot and redraws that slot's counter.
    ///
    /// When every counter sits at `AGING_MAX` the block is dropped and the
    /// cache is left untouched.
    pub fn evict(&mut self, block: Block, rng: &mut dyn RngCore) -> Eviction {
        let Some(slot) = self.victim() else {
            debug!(block = %block.id(), "all slots saturated, insert dropped");
            return Eviction::Dropped;
        };
        let incoming = block.id();
        let evicted = self.slots.update(slot, block);
        self.counters[slot] = draw_counter(rng);
        debug!(
            slot,
            block = %incoming,
            evicted = ?evicted.as_ref().map(Block::id),
            counter = self.counters[slot],
            "slot replaced"
        );
        Eviction::Replaced { slot, evicted }
    }
}
