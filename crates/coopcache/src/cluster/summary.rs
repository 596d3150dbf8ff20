//! Coordinator-side content summaries.
//!
//! A summary is the coordinator's picture of one client's cache. It is a
//! projection refreshed on demand, never updated as the client's cache
//! changes, so it can claim blocks the client has since evicted and miss
//! blocks the client has since fetched.

use fnv::FnvHashSet;

use crate::common::ContentId;

/// Set of content identities the coordinator believes a client holds.
#[derive(Clone, Debug, Default)]
pub struct ContentSummary {
    ids: FnvHashSet<ContentId>,
    refreshes: u64,
}

impl ContentSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the summary claims `id`.
    #[inline]
    pub fn contains(&self, id: ContentId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of identities claimed.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is claimed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of times this summary has been refreshed.
    #[inline]
    pub const fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Replaces the claimed identities with `ids`.
    pub fn refresh(&mut self, ids: impl IntoIterator<Item = ContentId>) {
        self.ids.clear();
        self.ids.extend(ids);
        self.refreshes += 1;
    }
}
