//! Single-node Block Storage.
//!
//! This module implements the storage primitives every cache and the
//! coordinator's disk are built on. It provides:
//! 1. **Slot Array:** Fixed-capacity cache storage with lookup by content identity.
//! 2. **Disk:** The authoritative, index-addressed backing store.
//!
//! Neither primitive models latency; costs are accounted by the cluster.

use fnv::FnvHashMap;

use crate::common::{Block, ClusterError, ContentId};

/// Fixed-capacity array of cache slots.
///
/// The capacity is fixed at construction and never changes. A slot is empty
/// until warm-up or a replacement writes a block into it.
#[derive(Clone, Debug)]
pub struct SlotArray {
    slots: Vec<Option<Block>>,
}

impl SlotArray {
    /// Creates an array of `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Finds the slot holding `id` by scanning the occupied slots in order.
    pub fn lookup(&self, id: ContentId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|block| block.id() == id))
    }

    /// Returns the block stored in `slot`, if any.
    pub fn get_block(&self, slot: usize) -> Option<&Block> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Overwrites `slot` with `block`, returning the previous occupant.
    ///
    /// Out-of-range slots are ignored and return `None`.
    pub fn update(&mut self, slot: usize, block: Block) -> Option<Block> {
        self.slots
            .get_mut(slot)
            .and_then(|entry| entry.replace(block))
    }

    /// Fills the array from the front with `blocks`, clearing the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::WarmUpOverflow`] if there are more blocks than slots.
    pub fn load(&mut self, blocks: &[Block]) -> Result<(), ClusterError> {
        if blocks.len() > self.slots.len() {
            return Err(ClusterError::WarmUpOverflow {
                supplied: blocks.len(),
                capacity: self.slots.len(),
            });
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = blocks.get(i).cloned();
        }
        Ok(())
    }

    /// Iterates over the occupied slots' blocks in slot order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

/// Authoritative backing store owned by the coordinator.
///
/// Blocks are appended in catalogue order and indexed by content identity.
/// Storing a payload that is already present returns its existing index.
#[derive(Clone, Debug)]
pub struct Disk {
    blocks: Vec<Block>,
    index: FnvHashMap<ContentId, usize>,
    capacity: usize,
}

impl Disk {
    /// Creates an empty disk holding at most `capacity` blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ClusterError> {
        if capacity == 0 {
            return Err(ClusterError::ZeroCapacity { what: "disk" });
        }
        Ok(Self {
            blocks: Vec::with_capacity(capacity),
            index: FnvHashMap::default(),
            capacity,
        })
    }

    /// Returns the maximum number of blocks.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` when nothing has been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Stores `block` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::DiskFull`] when a new block does not fit.
    pub fn store(&mut self, block: Block) -> Result<usize, ClusterError> {
        if let Some(&existing) = self.index.get(&block.id()) {
            return Ok(existing);
        }
        if self.blocks.len() >= self.capacity {
            return Err(ClusterError::DiskFull {
                capacity: self.capacity,
            });
        }
        let slot = self.blocks.len();
        let _ = self.index.insert(block.id(), slot);
        self.blocks.push(block);
        Ok(slot)
    }

    /// Finds the index holding `id`.
    pub fn lookup(&self, id: ContentId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Returns the block at `slot`.
    pub fn get_block(&self, slot: usize) -> Option<&Block> {
        self.blocks.get(slot)
    }

    /// Iterates over the stored blocks in catalogue order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }
}
